use crate::palette::ColorScheme;
use crate::settings::EffectSettings;

/// A named preset bundling effect settings with a color scheme
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub settings: EffectSettings,
    pub scheme: ColorScheme,
}

/// Built-in presets in number-key order
pub fn builtin() -> Vec<Preset> {
    vec![
        // Classic - default settings
        Preset {
            name: "Classic",
            description: "Default grid and colors",
            settings: EffectSettings::default(),
            scheme: ColorScheme::Classic,
        },
        // Fine Mesh - tighter grid, smaller dots
        Preset {
            name: "Fine Mesh",
            description: "Dense grid of small dots",
            settings: EffectSettings {
                spacing: 10,
                dot_size: 6.0,
                ..Default::default()
            },
            scheme: ColorScheme::Classic,
        },
        // Billboard - large text, chunky dots
        Preset {
            name: "Billboard",
            description: "Big letters with chunky dots",
            settings: EffectSettings {
                font_px: 320.0,
                spacing: 22,
                dot_size: 14.0,
                ..Default::default()
            },
            scheme: ColorScheme::Ember,
        },
        // Skittish - wide pointer influence, strong push
        Preset {
            name: "Skittish",
            description: "Dots scatter far from the pointer",
            settings: EffectSettings {
                repel_radius: 240.0,
                max_repel: 60.0,
                ..Default::default()
            },
            scheme: ColorScheme::Neon,
        },
        // Calm - narrow influence, gentle push
        Preset {
            name: "Calm",
            description: "Dots barely stir as the pointer passes",
            settings: EffectSettings {
                repel_radius: 80.0,
                max_repel: 12.0,
                ..Default::default()
            },
            scheme: ColorScheme::Ocean,
        },
        // Wireframe - long links, tiny dots
        Preset {
            name: "Wireframe",
            description: "Long links between tiny dots",
            settings: EffectSettings {
                neighbor_factor: 2.5,
                dot_size: 4.0,
                ..Default::default()
            },
            scheme: ColorScheme::Mono,
        },
    ]
}

/// Find a preset by name
pub fn find(name: &str) -> Option<Preset> {
    builtin().into_iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_is_case_insensitive() {
        assert!(find("classic").is_some());
        assert!(find("FINE MESH").is_some());
        assert!(find("no such preset").is_none());
    }

    #[test]
    fn test_preset_names_are_unique() {
        let presets = builtin();
        let mut names: Vec<&str> = presets.iter().map(|p| p.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), presets.len());
    }

    #[test]
    fn test_preset_settings_stay_within_editor_bounds() {
        for preset in builtin() {
            let s = &preset.settings;
            assert!((60.0..=600.0).contains(&s.font_px), "{}", preset.name);
            assert!((6..=60).contains(&s.spacing), "{}", preset.name);
            assert!((1.0..=3.0).contains(&s.neighbor_factor), "{}", preset.name);
            assert!((40.0..=400.0).contains(&s.repel_radius), "{}", preset.name);
            assert!((5.0..=120.0).contains(&s.max_repel), "{}", preset.name);
            assert!((2.0..=40.0).contains(&s.dot_size), "{}", preset.name);
            assert!((2..=16).contains(&s.scale), "{}", preset.name);
        }
    }
}
