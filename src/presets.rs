use crate::error::ConfigError;

/// One Gray-Scott regime: feed and kill rates. Diffusion rates are shared.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub feed: f32,
    pub kill: f32,
}

/// Diffusion rate of the substrate, identical for every preset.
pub const DIFFUSION_A: f32 = 1.0;
/// Diffusion rate of the activator, identical for every preset.
pub const DIFFUSION_B: f32 = 0.5;

/// Feed/kill pairs tuned for the 3x3 kernel with dA = 1.0, dB = 0.5.
/// Index 0 is the default regime.
pub const PRESETS: [Preset; 7] = [
    Preset { name: "Coral", feed: 0.055, kill: 0.062 },
    Preset { name: "Mitosis", feed: 0.0367, kill: 0.0649 },
    Preset { name: "Brains", feed: 0.029, kill: 0.057 },
    Preset { name: "Worms and dots", feed: 0.078, kill: 0.061 },
    Preset { name: "Bubbles", feed: 0.098, kill: 0.057 },
    Preset { name: "Solitons", feed: 0.030, kill: 0.062 },
    Preset { name: "Waves", feed: 0.014, kill: 0.045 },
];

pub fn by_index(index: usize) -> Result<&'static Preset, ConfigError> {
    PRESETS.get(index).ok_or(ConfigError::UnknownPresetIndex {
        index,
        len: PRESETS.len(),
    })
}

/// Case-insensitive; `_` and `-` match spaces so names work on a command line.
pub fn by_name(name: &str) -> Result<&'static Preset, ConfigError> {
    let wanted = normalize(name);
    PRESETS
        .iter()
        .find(|p| normalize(p.name) == wanted)
        .ok_or_else(|| ConfigError::UnknownPresetName(name.to_string()))
}

/// A bare number selects by table index, anything else by name.
pub fn lookup(key: &str) -> Result<&'static Preset, ConfigError> {
    match key.trim().parse::<usize>() {
        Ok(index) => by_index(index),
        Err(_) => by_name(key),
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '_' | '-' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

pub fn names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|p| p.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_preset_is_coral() {
        let p = by_index(0).unwrap();
        assert_eq!(p.feed, 0.055);
        assert_eq!(p.kill, 0.062);
    }

    #[test]
    fn unknown_index_is_config_error() {
        let err = by_index(PRESETS.len()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownPresetIndex { index: 7, len: 7 }));
    }

    #[test]
    fn lookup_by_name_is_forgiving() {
        assert_eq!(by_name("worms_and_dots").unwrap().name, "Worms and dots");
        assert_eq!(by_name("BRAINS").unwrap().name, "Brains");
        assert_eq!(by_name(" bubbles ").unwrap().name, "Bubbles");
        assert!(matches!(
            by_name("spirals"),
            Err(ConfigError::UnknownPresetName(_))
        ));
    }

    #[test]
    fn lookup_accepts_index_or_name() {
        assert_eq!(lookup("2").unwrap().name, "Brains");
        assert_eq!(lookup("bubbles").unwrap().name, "Bubbles");
        assert!(matches!(
            lookup("99"),
            Err(ConfigError::UnknownPresetIndex { index: 99, .. })
        ));
    }

    #[test]
    fn names_are_unique() {
        let all: Vec<_> = names().map(normalize).collect();
        for (i, n) in all.iter().enumerate() {
            assert!(!all[i + 1..].contains(n), "duplicate preset {n}");
        }
    }
}
