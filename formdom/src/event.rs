/// Host events with element targeting.
///
/// These are what a browser would fire at a form control. They are produced
/// by the interaction helpers on [`Document`](crate::Document) and routed to
/// whatever is listening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The value of a text control changed while typing
    Input { target: String },
    /// A committed change (checkbox/radio toggled, option picked)
    Change { target: String },
    /// The control lost focus
    Blur { target: String },
    /// A form was reset to its default values
    Reset { target: String },
}

impl Event {
    pub fn target(&self) -> &str {
        match self {
            Event::Input { target }
            | Event::Change { target }
            | Event::Blur { target }
            | Event::Reset { target } => target,
        }
    }

    /// DOM name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            Event::Input { .. } => "input",
            Event::Change { .. } => "change",
            Event::Blur { .. } => "blur",
            Event::Reset { .. } => "reset",
        }
    }
}
