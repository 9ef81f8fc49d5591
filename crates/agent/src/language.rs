//! Question language detection.
//!
//! Script-based: Arabic questions are written in Arabic script, English ones
//! in ASCII Latin, and the two never blend enough to confuse a majority
//! count. Anything else (a third script, accented Latin-script languages,
//! no letters at all) is unsupported. This conflates other Latin-script
//! languages typed in plain ASCII with English; a classifier model could do
//! better, but the index only serves Arabic and English anyway.

use rihla_prompt::Language;

/// Classify the question's language, or `None` if unsupported.
pub fn detect(text: &str) -> Option<Language> {
    let mut arabic = 0usize;
    let mut latin = 0usize;
    let mut other = 0usize;

    for c in text.chars() {
        if !c.is_alphabetic() {
            continue;
        }

        if is_arabic_script(c) {
            arabic += 1;
        } else if c.is_ascii_alphabetic() {
            latin += 1;
        } else {
            other += 1;
        }
    }

    let total = arabic + latin + other;
    if total == 0 {
        return None;
    }

    // Strict majority of letters decides
    if arabic * 2 > total {
        Some(Language::Arabic)
    } else if latin * 2 > total {
        Some(Language::English)
    } else {
        None
    }
}

/// Arabic script blocks, including presentation forms.
fn is_arabic_script(c: char) -> bool {
    matches!(
        c,
        '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}'
    )
}
