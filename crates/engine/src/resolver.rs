use crate::error::{EngineError, Result};
use crate::template::Template;

/// Matching strategy that produced a resolution, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    ExactName,
    ExactId,
    PartialName,
    Keyword,
    Heuristic,
    Fallback,
}

/// A resolved template id plus the tier that produced it. The tier is
/// kept for logging and tests; tool output only carries the id.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub template_id: String,
    pub tier: MatchTier,
}

/// One auto-selection rule: fires when the case-folded input text
/// contains any of `any`, or all of `all`. A fired rule looks for the
/// first catalog template matching any of its search terms; no match
/// falls through to the next rule.
struct HeuristicRule {
    any: &'static [&'static str],
    all: &'static [&'static str],
    terms: &'static [&'static str],
}

impl HeuristicRule {
    fn fires(&self, text: &str) -> bool {
        self.any.iter().any(|needle| text.contains(needle))
            || (!self.all.is_empty() && self.all.iter().all(|needle| text.contains(needle)))
    }
}

const HEURISTIC_RULES: &[HeuristicRule] = &[
    HeuristicRule {
        any: &["vs", "or", "choose"],
        all: &[],
        terms: &["two buttons", "button", "choice"],
    },
    HeuristicRule {
        any: &["brain", "smart", "intelligence"],
        all: &[],
        terms: &["brain", "expanding"],
    },
    HeuristicRule {
        any: &["prefer"],
        all: &["like", "dislike"],
        terms: &["drake"],
    },
    HeuristicRule {
        any: &["fine", "ok", "disaster"],
        all: &[],
        terms: &["fine"],
    },
    HeuristicRule {
        any: &[],
        all: &["change", "mind"],
        terms: &["change", "mind", "cmm"],
    },
    HeuristicRule {
        any: &["distract"],
        all: &["look", "at"],
        terms: &["distracted", "boyfriend"],
    },
    HeuristicRule {
        any: &["?", "question", "is this"],
        all: &[],
        terms: &["pigeon"],
    },
];

/// Maps `(free text, optional user hint)` to one template from a borrowed
/// catalog snapshot. Deterministic: ties break on catalog order.
pub struct TemplateResolver<'a> {
    templates: &'a [Template],
}

impl<'a> TemplateResolver<'a> {
    pub fn new(templates: &'a [Template]) -> Self {
        Self { templates }
    }

    /// Resolve a template for `text`, honoring `hint` first. Fails only
    /// when the catalog is empty.
    pub fn resolve(&self, text: &str, hint: Option<&str>) -> Result<Resolution> {
        if self.templates.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }

        if let Some(hint) = hint {
            if let Some((template, tier)) = self.match_hint(hint) {
                log::debug!("hint '{hint}' resolved template {} via {tier:?}", template.id);
                return Ok(Resolution {
                    template_id: template.id.clone(),
                    tier,
                });
            }
        }

        let lower = text.to_lowercase();
        for rule in HEURISTIC_RULES {
            if !rule.fires(&lower) {
                continue;
            }
            if let Some(template) = self.find_by_terms(rule.terms) {
                log::debug!(
                    "heuristic {:?} resolved template {}",
                    rule.terms,
                    template.id
                );
                return Ok(Resolution {
                    template_id: template.id.clone(),
                    tier: MatchTier::Heuristic,
                });
            }
        }

        let fallback = self
            .find_by_terms(&["drake"])
            .or_else(|| self.find_by_terms(&["fry"]))
            .unwrap_or(&self.templates[0]);
        log::debug!("fallback resolved template {}", fallback.id);
        Ok(Resolution {
            template_id: fallback.id.clone(),
            tier: MatchTier::Fallback,
        })
    }

    /// Hint tiers only — no heuristics, no fallback. Used by the single
    /// template lookup operation, where "not found" is an answer.
    pub fn lookup(&self, hint: &str) -> Result<&'a Template> {
        if self.templates.is_empty() {
            return Err(EngineError::EmptyCatalog);
        }
        if let Some((template, _tier)) = self.match_hint(hint) {
            return Ok(template);
        }

        let mut available = self
            .templates
            .iter()
            .map(|t| t.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        if available.len() > 200 {
            available.truncate(200);
            available.push_str("...");
        }
        Err(EngineError::TemplateNotFound(format!(
            "Meme template \"{hint}\" not found. Available templates: {available}"
        )))
    }

    fn match_hint(&self, hint: &str) -> Option<(&'a Template, MatchTier)> {
        let hint = hint.trim().to_lowercase();
        if hint.is_empty() {
            return None;
        }

        let tiers: [(MatchTier, fn(&Template, &str) -> bool); 4] = [
            (MatchTier::ExactName, |t, hint| {
                t.name.to_lowercase() == hint
            }),
            (MatchTier::ExactId, |t, hint| t.id.to_lowercase() == hint),
            (MatchTier::PartialName, |t, hint| {
                let name = t.name.to_lowercase();
                name.contains(hint) || hint.contains(&name)
            }),
            (MatchTier::Keyword, |t, hint| {
                t.keywords
                    .iter()
                    .any(|keyword| keyword.to_lowercase().contains(hint))
            }),
        ];

        for (tier, matches) in tiers {
            if let Some(template) = self.templates.iter().find(|t| matches(t, &hint)) {
                return Some((template, tier));
            }
        }
        None
    }

    fn find_by_terms(&self, terms: &[&str]) -> Option<&'a Template> {
        self.templates
            .iter()
            .find(|template| terms.iter().any(|term| template.matches_term(term)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn template(id: &str, name: &str, keywords: &[&str]) -> Template {
        Template {
            id: id.to_string(),
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            styles: Vec::new(),
            example_url: None,
            blank_url: None,
            box_count: None,
        }
    }

    fn catalog() -> Vec<Template> {
        vec![
            template("87743020", "Two Buttons", &["choice"]),
            template("181913649", "Drake Hotline Bling", &["drake"]),
            template("93895088", "Expanding Brain", &[]),
            template("100777631", "Is This A Pigeon", &["butterfly"]),
            template("55311130", "This Is Fine", &[]),
        ]
    }

    #[test]
    fn empty_catalog_fails() {
        let resolver = TemplateResolver::new(&[]);
        assert!(matches!(
            resolver.resolve("anything", None),
            Err(EngineError::EmptyCatalog)
        ));
    }

    #[test]
    fn hint_exact_name_beats_heuristics() {
        let catalog = catalog();
        let resolver = TemplateResolver::new(&catalog);

        // Text would trigger the "vs" rule, but the hint wins.
        let resolution = resolver
            .resolve("coffee vs tea", Some("Expanding Brain"))
            .unwrap();
        assert_eq!(resolution.template_id, "93895088");
        assert_eq!(resolution.tier, MatchTier::ExactName);
    }

    #[test]
    fn hint_exact_id_matches() {
        let catalog = catalog();
        let resolver = TemplateResolver::new(&catalog);

        let resolution = resolver.resolve("whatever", Some("181913649")).unwrap();
        assert_eq!(resolution.template_id, "181913649");
        assert_eq!(resolution.tier, MatchTier::ExactId);
    }

    #[test]
    fn hint_partial_name_matches_either_direction() {
        let catalog = catalog();
        let resolver = TemplateResolver::new(&catalog);

        let resolution = resolver.resolve("whatever", Some("drake")).unwrap();
        assert_eq!(resolution.template_id, "181913649");
        assert_eq!(resolution.tier, MatchTier::PartialName);

        // Hint longer than the name also counts.
        let resolution = resolver
            .resolve("whatever", Some("the two buttons meme"))
            .unwrap();
        assert_eq!(resolution.template_id, "87743020");
        assert_eq!(resolution.tier, MatchTier::PartialName);
    }

    #[test]
    fn hint_keyword_match_is_last_hint_tier() {
        let catalog = catalog();
        let resolver = TemplateResolver::new(&catalog);

        let resolution = resolver.resolve("whatever", Some("butterfly")).unwrap();
        assert_eq!(resolution.template_id, "100777631");
        assert_eq!(resolution.tier, MatchTier::Keyword);
    }

    #[test]
    fn unmatched_hint_falls_through_to_heuristics() {
        let catalog = catalog();
        let resolver = TemplateResolver::new(&catalog);

        let resolution = resolver
            .resolve("galaxy brain idea", Some("no such template"))
            .unwrap();
        assert_eq!(resolution.template_id, "93895088");
        assert_eq!(resolution.tier, MatchTier::Heuristic);
    }

    #[test]
    fn vs_trigger_selects_two_buttons() {
        let catalog = catalog();
        let resolver = TemplateResolver::new(&catalog);

        let resolution = resolver.resolve("coffee vs tea", None).unwrap();
        assert_eq!(resolution.template_id, "87743020");
        assert_eq!(resolution.tier, MatchTier::Heuristic);
    }

    #[test]
    fn question_trigger_selects_pigeon() {
        let catalog = catalog();
        let resolver = TemplateResolver::new(&catalog);

        let resolution = resolver.resolve("is this a test?", None).unwrap();
        assert_eq!(resolution.template_id, "100777631");
    }

    #[test]
    fn fired_trigger_without_match_falls_through() {
        // "change my mind" fires, but nothing matches its terms; the text
        // also contains "?" so the pigeon rule resolves instead.
        let templates = vec![
            template("100777631", "Is This A Pigeon", &[]),
            template("181913649", "Drake Hotline Bling", &[]),
        ];
        let resolver = TemplateResolver::new(&templates);

        let resolution = resolver.resolve("change my mind?", None).unwrap();
        assert_eq!(resolution.template_id, "100777631");
        assert_eq!(resolution.tier, MatchTier::Heuristic);
    }

    #[test]
    fn default_fallback_prefers_drake_then_fry() {
        let templates = vec![
            template("1", "Success Kid", &[]),
            template("2", "Futurama Fry", &[]),
            template("3", "Drake Hotline Bling", &[]),
        ];
        let resolver = TemplateResolver::new(&templates);

        let resolution = resolver.resolve("hello world", None).unwrap();
        assert_eq!(resolution.template_id, "3");
        assert_eq!(resolution.tier, MatchTier::Fallback);

        let no_drake = &templates[..2];
        let resolver = TemplateResolver::new(no_drake);
        let resolution = resolver.resolve("hello world", None).unwrap();
        assert_eq!(resolution.template_id, "2");
    }

    #[test]
    fn fallback_lands_on_first_entry_when_nothing_matches() {
        let templates = vec![
            template("1", "Success Kid", &[]),
            template("2", "Bad Luck Brian", &[]),
        ];
        let resolver = TemplateResolver::new(&templates);

        let resolution = resolver.resolve("hello world", None).unwrap();
        assert_eq!(resolution.template_id, "1");
        assert_eq!(resolution.tier, MatchTier::Fallback);
    }

    #[test]
    fn resolve_is_deterministic() {
        let catalog = catalog();
        let resolver = TemplateResolver::new(&catalog);

        let first = resolver.resolve("coffee vs tea", None).unwrap();
        for _ in 0..10 {
            let again = resolver.resolve("coffee vs tea", None).unwrap();
            assert_eq!(again.template_id, first.template_id);
        }
    }

    #[test]
    fn keyword_match_satisfies_heuristic_terms() {
        // Neither name nor id matches the "vs" rule's terms, but the
        // "choice" keyword does.
        let templates = vec![
            template("AA", "Left Exit 12 Off Ramp", &["choice"]),
            template("BB", "Drake Hotline Bling", &["drake"]),
        ];
        let resolver = TemplateResolver::new(&templates);

        let resolution = resolver.resolve("coffee vs tea", None).unwrap();
        assert_eq!(resolution.template_id, "AA");
        assert_eq!(resolution.tier, MatchTier::Heuristic);
    }

    #[test]
    fn lookup_walks_hint_tiers() {
        let catalog = catalog();
        let resolver = TemplateResolver::new(&catalog);

        assert_eq!(resolver.lookup("two buttons").unwrap().id, "87743020");
        assert_eq!(resolver.lookup("55311130").unwrap().id, "55311130");
        assert_eq!(resolver.lookup("butterfly").unwrap().id, "100777631");
    }

    #[test]
    fn lookup_reports_available_templates_when_missing() {
        let catalog = catalog();
        let resolver = TemplateResolver::new(&catalog);

        let err = resolver.lookup("no such meme").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("\"no such meme\" not found"));
        assert!(message.contains("Two Buttons"));
    }
}
