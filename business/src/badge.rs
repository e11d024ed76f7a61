//! Badges: a short label plus a style class describing a categorical state.

use crate::html::escape_html;

/// Colour category of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Red,
    Gray,
}

impl Tone {
    pub fn class(self) -> &'static str {
        match self {
            Self::Green => "badge-green",
            Self::Red => "badge-red",
            Self::Gray => "badge-gray",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub label: String,
    pub class: String,
}

impl Badge {
    pub fn new(label: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            class: class.into(),
        }
    }

    pub fn toned(label: impl Into<String>, tone: Tone) -> Self {
        Self::new(label, tone.class())
    }

    /// `<span class="badge {class}">{label}</span>`, both parts escaped.
    pub fn to_html(&self) -> String {
        format!(
            r#"<span class="badge {}">{}</span>"#,
            escape_html(&self.class),
            escape_html(&self.label)
        )
    }
}

/// Placeholder shown for missing values.
pub const MISSING: &str = "—";

/// Account status: blocked wins over active.
pub fn user_status(is_blocked: bool, is_active: bool) -> Badge {
    if is_blocked {
        Badge::toned("Bloqueado", Tone::Red)
    } else if is_active {
        Badge::toned("Activo", Tone::Green)
    } else {
        Badge::toned("Inactivo", Tone::Gray)
    }
}

/// Role badge; the class is derived from the lower-cased role.
pub fn user_role(role: Option<&str>) -> Badge {
    let role = role.unwrap_or_default();
    let label = if role.is_empty() { MISSING } else { role };
    Badge::new(label, format!("badge-role badge-{}", role.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_overrides_active() {
        assert_eq!(user_status(true, true), Badge::toned("Bloqueado", Tone::Red));
        assert_eq!(user_status(true, false), Badge::toned("Bloqueado", Tone::Red));
    }

    #[test]
    fn test_active_and_inactive() {
        assert_eq!(user_status(false, true).label, "Activo");
        assert_eq!(user_status(false, true).class, "badge-green");
        assert_eq!(user_status(false, false).label, "Inactivo");
        assert_eq!(user_status(false, false).class, "badge-gray");
    }

    #[test]
    fn test_role_class_is_lowercased() {
        let badge = user_role(Some("Admin"));
        assert_eq!(badge.label, "Admin");
        assert_eq!(badge.class, "badge-role badge-admin");
    }

    #[test]
    fn test_missing_role_uses_placeholder() {
        let badge = user_role(None);
        assert_eq!(badge.label, MISSING);
        assert_eq!(badge.class, "badge-role badge-");
        assert_eq!(user_role(Some("")).label, MISSING);
    }

    #[test]
    fn test_badge_html_is_escaped() {
        let html = Badge::new("<b>root</b>", "badge-role badge-<b>").to_html();
        assert_eq!(
            html,
            r#"<span class="badge badge-role badge-&lt;b&gt;">&lt;b&gt;root&lt;/b&gt;</span>"#
        );
    }
}
