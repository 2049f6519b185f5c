//! Named parameter values accepted by the television.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A name that does not belong to a parameter table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {table} {name:?} (expected one of: {expected})")]
pub struct UnknownName {
    pub table: &'static str,
    pub name: String,
    pub expected: String,
}

macro_rules! code_table {
    (
        $(#[$meta:meta])*
        $table:literal => $name:ident {
            $($variant:ident = $code:literal, $label:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Protocol byte for this value.
            pub fn code(self) -> u8 {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Lowercase name, as accepted by `from_str`.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = UnknownName;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
                $name::ALL
                    .iter()
                    .copied()
                    .find(|value| value.name().replace('-', "") == wanted)
                    .ok_or_else(|| UnknownName {
                        table: $table,
                        name: s.to_string(),
                        expected: $name::ALL
                            .iter()
                            .map(|value| value.name())
                            .collect::<Vec<_>>()
                            .join(", "),
                    })
            }
        }
    };
}

code_table! {
    /// Input families, the first data byte of an input selection.
    "input group" => InputGroup {
        Toggle = 0x00, "toggle";
        Tv = 0x01, "tv";
        Video = 0x02, "video";
        Component = 0x03, "component";
        Hdmi = 0x04, "hdmi";
        Pc = 0x05, "pc";
    }
}

code_table! {
    /// Picture presets. Not every input supports every preset.
    "picture mode" => PictureMode {
        Vivid = 0x00, "vivid";
        Standard = 0x01, "standard";
        Custom = 0x03, "custom";
    }
}

code_table! {
    /// Film motion processing.
    "cinemotion mode" => CineMotion {
        Off = 0x00, "off";
        Auto1 = 0x02, "auto1";
        Auto2 = 0x03, "auto2";
    }
}

code_table! {
    /// Aspect handling.
    "wide mode" => WideMode {
        WideZoom = 0x00, "wide-zoom";
        Full = 0x01, "full";
        Zoom = 0x02, "zoom";
        Normal = 0x03, "normal";
        PcNormal = 0x05, "pc-normal";
        PcFull1 = 0x06, "pc-full1";
        PcFull2 = 0x07, "pc-full2";
        HStretch = 0x09, "h-stretch";
    }
}

code_table! {
    /// Inputs that can be selected directly.
    ///
    /// `Toggle` and `Tv` are addressed by group alone; the rest also carry a
    /// unit number within their group.
    "input" => Input {
        Toggle = 0x00, "toggle";
        Tv = 0x01, "tv";
        Video1 = 0x02, "video1";
        Video2 = 0x02, "video2";
        Component1 = 0x03, "component1";
        Component2 = 0x03, "component2";
        Hdmi1 = 0x04, "hdmi1";
        Hdmi2 = 0x04, "hdmi2";
        Hdmi3 = 0x04, "hdmi3";
        Hdmi4 = 0x04, "hdmi4";
        Pc = 0x05, "pc";
    }
}

impl Input {
    /// The group this input belongs to.
    pub fn group(self) -> InputGroup {
        match self {
            Input::Toggle => InputGroup::Toggle,
            Input::Tv => InputGroup::Tv,
            Input::Video1 | Input::Video2 => InputGroup::Video,
            Input::Component1 | Input::Component2 => InputGroup::Component,
            Input::Hdmi1 | Input::Hdmi2 | Input::Hdmi3 | Input::Hdmi4 => InputGroup::Hdmi,
            Input::Pc => InputGroup::Pc,
        }
    }

    /// Unit number within the group, when the group has more than one.
    pub fn unit(self) -> Option<u8> {
        match self {
            Input::Toggle | Input::Tv => None,
            Input::Video1 | Input::Component1 | Input::Hdmi1 | Input::Pc => Some(1),
            Input::Video2 | Input::Component2 | Input::Hdmi2 => Some(2),
            Input::Hdmi3 => Some(3),
            Input::Hdmi4 => Some(4),
        }
    }
}
