use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    Pt,
    En,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppLanguage {
    System,
    Pt,
    En,
}

pub fn parse_app_language(value: Option<&str>) -> AppLanguage {
    match value.map(|v| v.trim().to_lowercase()) {
        Some(v) if v == "pt" || v == "pt-br" => AppLanguage::Pt,
        Some(v) if v == "en" => AppLanguage::En,
        _ => AppLanguage::System,
    }
}

pub fn resolve_locale(language: AppLanguage) -> Locale {
    match language {
        AppLanguage::System => system_locale(),
        AppLanguage::Pt => Locale::Pt,
        AppLanguage::En => Locale::En,
    }
}

pub fn system_locale() -> Locale {
    static DETECTED: OnceLock<Locale> = OnceLock::new();
    *DETECTED.get_or_init(detect_system_locale)
}

fn detect_system_locale() -> Locale {
    for key in ["LC_ALL", "LC_MESSAGES", "LANG"] {
        if let Ok(raw) = std::env::var(key) {
            if let Some(locale) = parse_env_locale(&raw) {
                return locale;
            }
        }
    }
    Locale::Pt
}

fn parse_env_locale(raw: &str) -> Option<Locale> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }
    let short = normalized
        .split(['.', '@'])
        .next()
        .unwrap_or(&normalized)
        .trim();
    if short.starts_with("pt") {
        return Some(Locale::Pt);
    }
    if short.starts_with("en") {
        return Some(Locale::En);
    }
    None
}

/// Title of a step added without a click position. `when` is already formatted.
pub fn manual_step_title(locale: Locale, num: usize, when: &str) -> String {
    match locale {
        Locale::Pt => format!("Passo #{num} — {when}"),
        Locale::En => format!("Step #{num} — {when}"),
    }
}

pub fn manual_step_description(locale: Locale) -> &'static str {
    match locale {
        Locale::Pt => "Descreva a ação realizada, o objetivo e o resultado esperado.",
        Locale::En => "Describe the action taken, its goal and the expected result.",
    }
}

pub fn click_step_title(locale: Locale, x: i64, y: i64) -> String {
    match locale {
        Locale::Pt => format!("Clicado no ponto ({x}, {y})"),
        Locale::En => format!("Clicked at ({x}, {y})"),
    }
}

pub fn labelled_click_description(locale: Locale, label: &str, x: i64, y: i64) -> String {
    match locale {
        Locale::Pt => format!(
            "Clique no item \"{label}\" ({x}, {y}) para executar a ação pretendida. Descreva o objetivo, os passos e o resultado esperado."
        ),
        Locale::En => format!(
            "Click the \"{label}\" item ({x}, {y}) to perform the intended action. Describe the goal, the steps and the expected result."
        ),
    }
}

pub fn unlabelled_click_description(locale: Locale, x: i64, y: i64) -> String {
    match locale {
        Locale::Pt => format!(
            "Clique na área indicada ({x}, {y}). Descreva o objetivo, os passos e o resultado esperado."
        ),
        Locale::En => format!(
            "Click the highlighted area ({x}, {y}). Describe the goal, the steps and the expected result."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_app_language_handles_known_values() {
        assert_eq!(parse_app_language(Some("system")), AppLanguage::System);
        assert_eq!(parse_app_language(Some("en")), AppLanguage::En);
        assert_eq!(parse_app_language(Some("pt")), AppLanguage::Pt);
        assert_eq!(parse_app_language(Some(" PT-BR ")), AppLanguage::Pt);
    }

    #[test]
    fn parse_app_language_falls_back_to_system() {
        assert_eq!(parse_app_language(None), AppLanguage::System);
        assert_eq!(parse_app_language(Some("fr")), AppLanguage::System);
        assert_eq!(parse_app_language(Some("")), AppLanguage::System);
    }

    #[test]
    fn parse_env_locale_parses_pt_and_en() {
        assert_eq!(parse_env_locale("pt_BR.UTF-8"), Some(Locale::Pt));
        assert_eq!(parse_env_locale("en_US.UTF-8"), Some(Locale::En));
        assert_eq!(parse_env_locale("pt@euro"), Some(Locale::Pt));
        assert_eq!(parse_env_locale("fr_FR.UTF-8"), None);
    }

    #[test]
    fn resolve_locale_resolves_explicit_languages() {
        assert_eq!(resolve_locale(AppLanguage::En), Locale::En);
        assert_eq!(resolve_locale(AppLanguage::Pt), Locale::Pt);
    }

    #[test]
    fn click_texts_render_translated_strings() {
        assert_eq!(click_step_title(Locale::Pt, 10, 20), "Clicado no ponto (10, 20)");
        assert_eq!(click_step_title(Locale::En, 10, 20), "Clicked at (10, 20)");
        assert_eq!(
            labelled_click_description(Locale::Pt, "Salvar", 1, 2),
            "Clique no item \"Salvar\" (1, 2) para executar a ação pretendida. Descreva o objetivo, os passos e o resultado esperado."
        );
        assert!(unlabelled_click_description(Locale::En, 3, 4).starts_with("Click the highlighted area (3, 4)."));
    }

    #[test]
    fn manual_texts_render_translated_strings() {
        assert_eq!(
            manual_step_title(Locale::Pt, 2, "18/10/2026 10:00:00"),
            "Passo #2 — 18/10/2026 10:00:00"
        );
        assert_eq!(
            manual_step_description(Locale::En),
            "Describe the action taken, its goal and the expected result."
        );
    }
}
