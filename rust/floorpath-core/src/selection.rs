//! Source/destination choice driven by hover and click events.
//!
//! Pressing over a room makes it the source, dragging and releasing set the
//! destination. The hovered room is sticky: moving over empty space keeps the
//! last room that was under the cursor.

pub const DEFAULT_SOURCE: &str = "pab1";
pub const DEFAULT_DESTINATION: &str = "kiosko";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteSelection {
    default_src: String,
    default_dst: String,
    hovered: Option<String>,
    src: Option<String>,
    dst: Option<String>,
    pressed: bool,
}

impl Default for RouteSelection {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCE, DEFAULT_DESTINATION)
    }
}

impl RouteSelection {
    pub fn new(default_src: impl Into<String>, default_dst: impl Into<String>) -> Self {
        Self {
            default_src: default_src.into(),
            default_dst: default_dst.into(),
            hovered: None,
            src: None,
            dst: None,
            pressed: false,
        }
    }

    /// Cursor moved; `room` is what the picker found under it, if anything.
    pub fn hover(&mut self, room: Option<&str>) {
        if let Some(r) = room {
            self.hovered = Some(r.to_string());
        }
        if self.pressed {
            self.dst = self.hovered.clone();
        }
    }

    pub fn press(&mut self) {
        self.pressed = true;
        self.src = self.hovered.clone();
    }

    pub fn release(&mut self) {
        self.pressed = false;
        self.dst = self.hovered.clone();
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Current `(source, destination)`, falling back to the defaults.
    pub fn endpoints(&self) -> (&str, &str) {
        (
            self.src.as_deref().unwrap_or(&self.default_src),
            self.dst.as_deref().unwrap_or(&self.default_dst),
        )
    }
}
