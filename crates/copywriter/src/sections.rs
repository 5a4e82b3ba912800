//! Text clean-up for generated candidates and section splitting for copy
//! submitted for improvement.

use marketing_core::Component;

/// Label spellings recognised at the start of a line, longest first so that
/// `BENEFIT STATEMENT` wins over `BENEFIT`.
const LABELS: &[(&str, Component)] = &[
    ("SUPPORTING EVIDENCE", Component::SupportingEvidence),
    ("BENEFIT STATEMENT", Component::BenefitStatement),
    ("VALUE ALIGNMENT", Component::ValueAlignment),
    ("CALL TO ACTION", Component::CallToAction),
    ("BENEFITS", Component::BenefitStatement),
    ("BENEFIT", Component::BenefitStatement),
    ("EVIDENCE", Component::SupportingEvidence),
    ("HEADLINE", Component::Headline),
    ("CTA", Component::CallToAction),
];

/// Split a `LABEL: text` line. Markdown bold and list markers around the
/// label are tolerated.
fn split_label(line: &str) -> Option<(Component, &str)> {
    let stripped = line
        .trim_start()
        .trim_start_matches(['*', '-', '#', ' '])
        .trim_start();
    let (head, rest) = stripped.split_once(':')?;
    let head = head.trim().trim_end_matches('*').trim();
    let component = LABELS
        .iter()
        .find(|(label, _)| head.eq_ignore_ascii_case(label))
        .map(|(_, component)| *component)?;
    Some((component, rest.trim_start_matches('*').trim()))
}

fn strip_quotes(text: &str) -> &str {
    const PAIRS: [(char, char); 3] = [('"', '"'), ('\'', '\''), ('\u{201c}', '\u{201d}')];
    for (open, close) in PAIRS {
        if let Some(inner) = text
            .strip_prefix(open)
            .and_then(|rest| rest.strip_suffix(close))
        {
            return inner.trim();
        }
    }
    text
}

/// Clean a raw model reply for one component: trim, drop a leading component
/// label and surrounding quotes, and collapse the lines into one.
pub fn normalize_candidate(raw: &str) -> String {
    let trimmed = raw.trim();
    let body = match split_label(trimmed) {
        Some((_, rest)) => rest,
        None => trimmed,
    };
    strip_quotes(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Sections found in existing copy, indexed by [`Component::index`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopySections {
    sections: [Option<String>; 5],
}

impl CopySections {
    pub fn get(&self, component: Component) -> Option<&str> {
        self.sections[component.index()].as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Option::is_none)
    }

    fn append(&mut self, component: Component, text: &str) {
        if text.is_empty() {
            return;
        }
        let slot = &mut self.sections[component.index()];
        match slot {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(text);
            }
            None => *slot = Some(text.to_string()),
        }
    }
}

/// Split labelled copy into its components. Lines following a label belong
/// to it until the next label; text before the first label is ignored.
pub fn parse_sections(existing_copy: &str) -> CopySections {
    let mut sections = CopySections::default();
    let mut current = None;
    for line in existing_copy.lines() {
        if let Some((component, rest)) = split_label(line) {
            current = Some(component);
            sections.append(component, rest);
        } else if let Some(component) = current {
            sections.append(component, line.trim());
        }
    }
    sections
}
