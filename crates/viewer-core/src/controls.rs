//! UI control identifiers and the widget surface the binding layer talks to.

use fnv::FnvHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlId {
    CameraX,
    CameraY,
    CameraZ,
    CameraSelect,
    LightX,
    LightY,
    LightZ,
    LightSelect,
    MaterialSelect,
    DodeX,
    DodeY,
    DodeColor,
    DodeSpeedX,
    DodeSpeedY,
    BoxX,
    BoxY,
    BoxColor,
    BoxSpeedY,
}

impl ControlId {
    pub const ALL: [ControlId; 18] = [
        ControlId::CameraX,
        ControlId::CameraY,
        ControlId::CameraZ,
        ControlId::CameraSelect,
        ControlId::LightX,
        ControlId::LightY,
        ControlId::LightZ,
        ControlId::LightSelect,
        ControlId::MaterialSelect,
        ControlId::DodeX,
        ControlId::DodeY,
        ControlId::DodeColor,
        ControlId::DodeSpeedX,
        ControlId::DodeSpeedY,
        ControlId::BoxX,
        ControlId::BoxY,
        ControlId::BoxColor,
        ControlId::BoxSpeedY,
    ];

    /// DOM element id of the widget.
    pub fn element_id(self) -> &'static str {
        match self {
            ControlId::CameraX => "cameraX",
            ControlId::CameraY => "cameraY",
            ControlId::CameraZ => "cameraZ",
            ControlId::CameraSelect => "cameraSelect",
            ControlId::LightX => "lightX",
            ControlId::LightY => "lightY",
            ControlId::LightZ => "lightZ",
            ControlId::LightSelect => "lightSelect",
            ControlId::MaterialSelect => "materialSelect",
            ControlId::DodeX => "dodeX",
            ControlId::DodeY => "dodeY",
            ControlId::DodeColor => "dodeColor",
            ControlId::DodeSpeedX => "dodeSpeedX",
            ControlId::DodeSpeedY => "dodeSpeedY",
            ControlId::BoxX => "boxX",
            ControlId::BoxY => "boxY",
            ControlId::BoxColor => "boxColor",
            ControlId::BoxSpeedY => "boxSpeedY",
        }
    }

    /// DOM id of the numeric readout next to a slider (`<id>Value`), if the
    /// control has one.
    pub fn readout_id(self) -> Option<&'static str> {
        Some(match self {
            ControlId::CameraX => "cameraXValue",
            ControlId::CameraY => "cameraYValue",
            ControlId::CameraZ => "cameraZValue",
            ControlId::LightX => "lightXValue",
            ControlId::LightY => "lightYValue",
            ControlId::LightZ => "lightZValue",
            ControlId::DodeX => "dodeXValue",
            ControlId::DodeY => "dodeYValue",
            ControlId::DodeSpeedX => "dodeSpeedXValue",
            ControlId::DodeSpeedY => "dodeSpeedYValue",
            ControlId::BoxX => "boxXValue",
            ControlId::BoxY => "boxYValue",
            ControlId::BoxSpeedY => "boxSpeedYValue",
            ControlId::CameraSelect
            | ControlId::LightSelect
            | ControlId::MaterialSelect
            | ControlId::DodeColor
            | ControlId::BoxColor => return None,
        })
    }

    pub fn is_select(self) -> bool {
        matches!(
            self,
            ControlId::CameraSelect | ControlId::LightSelect | ControlId::MaterialSelect
        )
    }
}

/// Page regions toggled by the responsive layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Panel {
    Controls,
    MobileMessage,
}

impl Panel {
    pub fn element_id(self) -> &'static str {
        match self {
            Panel::Controls => "controls",
            Panel::MobileMessage => "mobile-message",
        }
    }

    /// CSS `display` value used when the panel is shown.
    pub fn shown_display(self) -> &'static str {
        match self {
            Panel::Controls => "flex",
            Panel::MobileMessage => "block",
        }
    }
}

/// Widget surface of the windowing layer.
///
/// Lookups of absent widgets return `None`/`false`; absence is never an error.
pub trait Widgets {
    fn exists(&self, id: ControlId) -> bool;
    fn value(&self, id: ControlId) -> Option<String>;
    /// Returns false when the widget is absent.
    fn set_value(&mut self, id: ControlId, value: &str) -> bool;
    /// Write the numeric readout next to `id`. Returns false when absent.
    fn set_readout(&mut self, id: ControlId, text: &str) -> bool;
    fn panel_exists(&self, panel: Panel) -> bool;
    fn set_panel_visible(&mut self, panel: Panel, visible: bool);
}

/// Two-decimal readout text, matching the slider display format.
#[inline]
pub fn format_readout(value: f32) -> String {
    format!("{:.2}", value)
}

/// Parse a slider value. Non-numeric or non-finite text yields `None`.
#[inline]
pub fn parse_number(text: &str) -> Option<f32> {
    text.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// In-memory widget surface for headless embeddings and tests.
///
/// Only the controls passed at construction exist. Every successful write is
/// appended to a log that callers can drain.
#[derive(Default, Debug, Clone)]
pub struct MemoryWidgets {
    values: FnvHashMap<ControlId, String>,
    readouts: FnvHashMap<ControlId, String>,
    panels: FnvHashMap<Panel, bool>,
    writes: Vec<(ControlId, String)>,
}

impl MemoryWidgets {
    /// No widgets at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every control, readout and panel present, with blank values.
    pub fn full() -> Self {
        Self::with_controls(&ControlId::ALL)
    }

    pub fn with_controls(ids: &[ControlId]) -> Self {
        let mut w = Self::default();
        for id in ids {
            w.values.insert(*id, String::new());
            if id.readout_id().is_some() {
                w.readouts.insert(*id, String::new());
            }
        }
        w.panels.insert(Panel::Controls, true);
        w.panels.insert(Panel::MobileMessage, false);
        w
    }

    pub fn readout(&self, id: ControlId) -> Option<&str> {
        self.readouts.get(&id).map(String::as_str)
    }

    pub fn panel_visible(&self, panel: Panel) -> Option<bool> {
        self.panels.get(&panel).copied()
    }

    /// User-side edit: change a widget value without logging it as a
    /// programmatic write. Returns false when the widget is absent.
    pub fn edit(&mut self, id: ControlId, value: &str) -> bool {
        match self.values.get_mut(&id) {
            Some(v) => {
                *v = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ControlId) {
        self.values.remove(&id);
        self.readouts.remove(&id);
    }

    pub fn take_writes(&mut self) -> Vec<(ControlId, String)> {
        std::mem::take(&mut self.writes)
    }
}

impl Widgets for MemoryWidgets {
    fn exists(&self, id: ControlId) -> bool {
        self.values.contains_key(&id)
    }

    fn value(&self, id: ControlId) -> Option<String> {
        self.values.get(&id).cloned()
    }

    fn set_value(&mut self, id: ControlId, value: &str) -> bool {
        match self.values.get_mut(&id) {
            Some(v) => {
                *v = value.to_string();
                self.writes.push((id, value.to_string()));
                true
            }
            None => false,
        }
    }

    fn set_readout(&mut self, id: ControlId, text: &str) -> bool {
        match self.readouts.get_mut(&id) {
            Some(v) => {
                *v = text.to_string();
                true
            }
            None => false,
        }
    }

    fn panel_exists(&self, panel: Panel) -> bool {
        self.panels.contains_key(&panel)
    }

    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        if let Some(v) = self.panels.get_mut(&panel) {
            *v = visible;
        }
    }
}
