//! Built-in template definitions. Loaded once at startup, never mutated.

use serde::{Deserialize, Serialize};

/// Template selected for a brand-new session.
pub const DEFAULT_TEMPLATE_ID: &str = "modern-1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Modern,
    Classic,
    Minimal,
    Creative,
}

/// Colors as `#rrggbb` strings; parsed when a template is projected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub id: String,
    pub name: String,
    pub variant: Variant,
    pub description: String,
    /// Gallery preview image reference. Never fetched by the service.
    pub thumbnail: String,
    pub colors: Palette,
}

/// Read-only list of every template the service can render.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<TemplateDefinition>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<TemplateDefinition>) -> Self {
        Self { templates }
    }

    /// The four shipped templates, one per variant.
    pub fn builtin() -> Self {
        Self::new(vec![
            definition(
                "modern-1",
                "Modern Professional",
                Variant::Modern,
                "A clean and professional template with a modern layout. Perfect for most industries.",
                "https://images.pexels.com/photos/590022/pexels-photo-590022.jpeg",
                ["#2563eb", "#64748b", "#f59e0b", "#ffffff", "#0f172a"],
            ),
            definition(
                "classic-1",
                "Classic Elegant",
                Variant::Classic,
                "A timeless, elegant template suitable for traditional industries and experienced professionals.",
                "https://images.pexels.com/photos/5797899/pexels-photo-5797899.jpeg",
                ["#334155", "#64748b", "#7c3aed", "#f8fafc", "#1e293b"],
            ),
            definition(
                "minimal-1",
                "Minimalist",
                Variant::Minimal,
                "A clean, minimal design that puts content first. Ideal for tech and creative professionals.",
                "https://images.pexels.com/photos/6097919/pexels-photo-6097919.jpeg",
                ["#0f172a", "#475569", "#10b981", "#ffffff", "#1e293b"],
            ),
            definition(
                "creative-1",
                "Creative Bold",
                Variant::Creative,
                "A vibrant and bold template that stands out. Great for creative fields and design roles.",
                "https://images.pexels.com/photos/7925813/pexels-photo-7925813.jpeg",
                ["#7c3aed", "#8b5cf6", "#f43f5e", "#f8fafc", "#1e293b"],
            ),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&TemplateDefinition> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn all(&self) -> &[TemplateDefinition] {
        &self.templates
    }
}

fn definition(
    id: &str,
    name: &str,
    variant: Variant,
    description: &str,
    thumbnail: &str,
    [primary, secondary, accent, background, text]: [&str; 5],
) -> TemplateDefinition {
    TemplateDefinition {
        id: id.to_string(),
        name: name.to_string(),
        variant,
        description: description.to_string(),
        thumbnail: thumbnail.to_string(),
        colors: Palette {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            accent: accent.to_string(),
            background: background.to_string(),
            text: text.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_one_template_per_variant() {
        let catalog = TemplateCatalog::builtin();
        assert_eq!(catalog.all().len(), 4);
        for variant in [
            Variant::Modern,
            Variant::Classic,
            Variant::Minimal,
            Variant::Creative,
        ] {
            assert_eq!(
                catalog.all().iter().filter(|t| t.variant == variant).count(),
                1,
                "expected exactly one {variant:?} template"
            );
        }
    }

    #[test]
    fn test_default_template_exists() {
        assert!(TemplateCatalog::builtin().contains(DEFAULT_TEMPLATE_ID));
    }

    #[test]
    fn test_unknown_template_is_none() {
        assert!(TemplateCatalog::builtin().get("brutalist-9").is_none());
    }

    #[test]
    fn test_variant_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Variant::Creative).unwrap(),
            "\"creative\""
        );
    }
}
