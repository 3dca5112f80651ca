use serde::Serialize;

/// One caption region of a template and the text assigned to it.
/// Position 0 is the top box, 1 the bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaptionSlot {
    pub position: usize,
    pub text: String,
}

/// Separators scanned in priority order; the first one literally present
/// in the text wins.
const SEPARATORS: &[&str] = &[" vs ", " or ", "\n", " | ", " / "];

/// Layouts with a single caption region put all text in the bottom slot.
fn is_single_caption(template_id: &str) -> bool {
    template_id.contains("brain")
}

/// Split free text into the two caption slots of `template_id`.
///
/// Splits at the first occurrence of the highest-priority separator
/// present; the remainder keeps any later occurrences of that separator.
/// Without a separator the text is halved on word count, except for
/// single-caption layouts. One word yields an empty bottom slot; that
/// uneven boundary is intentional.
pub fn split_caption(text: &str, template_id: &str) -> [CaptionSlot; 2] {
    for separator in SEPARATORS {
        if let Some(at) = text.find(separator) {
            let top = text[..at].trim();
            let bottom = text[at + separator.len()..].trim();
            return slots(top, bottom);
        }
    }

    if is_single_caption(template_id) {
        return slots("", text);
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let mid = words.len().div_ceil(2);
    slots(&words[..mid].join(" "), &words[mid..].join(" "))
}

fn slots(top: &str, bottom: &str) -> [CaptionSlot; 2] {
    [
        CaptionSlot {
            position: 0,
            text: top.to_string(),
        },
        CaptionSlot {
            position: 1,
            text: bottom.to_string(),
        },
    ]
}
