/*!
 * Extraction artifact repair.
 *
 * Text pulled out of a laid-out page often comes back with stuttered letters
 * ("HHAANNNNAAHH"), mangled continuation markers ("(CCOONNTT''DD)"), doubled
 * punctuation and stray page numbers. `ArtifactRepairer::clean` normalizes a line
 * (or a whole page) before it reaches the classifier. Every step is total and the
 * pipeline as a whole is idempotent.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::app_config::RepairConfig;

/// Stuttered continuation marker: C+O+N+T+ quotes D+
static CONTINUED_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\bC+O+N+T+['"]*D+\b"#).expect("Invalid continued marker regex")
});

/// Stuttered (MORE) marker, possibly inside doubled parentheses
static MORE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(+\s*M+O+R+E+\s*\)+").expect("Invalid more marker regex")
});

/// Doubled punctuation and its single replacement
static DOUBLED_PUNCTUATION: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [(r"'{2,}", "'"), (r#""{2,}"#, "\""), (r"\({2,}", "("), (r"\){2,}", ")")]
        .iter()
        .map(|(p, r)| (Regex::new(p).expect("Invalid punctuation regex"), *r))
        .collect()
});

/// Lines holding nothing but a page number: "42.", "Page 7", "3/120", "- 12 -", "(9)"
static PAGE_NUMBER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*(?:\d{1,4}\.{0,2}|(?i:page)[ \t]+\d+|\d{1,4}/\d{1,4}|-[ \t]*\d+[ \t]*-|\(\d+\))[ \t]*$",
    )
    .expect("Invalid page number regex")
});

static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{4,}").expect("Invalid newline regex"));

static DEFAULT_REPAIRER: Lazy<ArtifactRepairer> = Lazy::new(ArtifactRepairer::default);

/// A known name and the stutter-tolerant template that finds it
#[derive(Debug, Clone)]
struct NameTemplate {
    pattern: Regex,
    name: String,
}

/// Artifact repair pipeline built around a dictionary of known character names
#[derive(Debug, Clone)]
pub struct ArtifactRepairer {
    templates: Vec<NameTemplate>,
}

impl Default for ArtifactRepairer {
    fn default() -> Self {
        Self::from_config(&RepairConfig::default())
    }
}

impl ArtifactRepairer {
    /// Build a repairer whose name templates come from `known_names`
    pub fn new<S: AsRef<str>>(known_names: &[S]) -> Self {
        let templates = known_names
            .iter()
            .filter_map(|name| {
                let name = name.as_ref().trim();
                let template = name_template(name)?;
                match Regex::new(&template) {
                    Ok(pattern) => Some(NameTemplate {
                        pattern,
                        name: name.to_string(),
                    }),
                    Err(e) => {
                        warn!("Skipping known name {:?}: {}", name, e);
                        None
                    }
                }
            })
            .collect();

        Self { templates }
    }

    pub fn from_config(config: &RepairConfig) -> Self {
        Self::new(&config.known_names)
    }

    /// Number of usable name templates
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    /// Run the full repair pipeline over `text`
    pub fn clean(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut text = text.to_string();

        // Dictionary names first so "HHAANNNNAAHH" keeps its double N
        for template in &self.templates {
            if template.pattern.is_match(&text) {
                text = template
                    .pattern
                    .replace_all(&text, regex::NoExpand(&template.name))
                    .into_owned();
            }
        }

        text = collapse_letter_runs(&text);

        text = CONTINUED_MARKER
            .replace_all(&text, regex::NoExpand("CONT'D"))
            .into_owned();
        text = MORE_MARKER.replace_all(&text, "(MORE)").into_owned();

        for (pattern, replacement) in DOUBLED_PUNCTUATION.iter() {
            text = pattern
                .replace_all(&text, regex::NoExpand(*replacement))
                .into_owned();
        }

        text = PAGE_NUMBER_LINE.replace_all(&text, "").into_owned();
        EXCESS_NEWLINES.replace_all(&text, "\n\n\n").into_owned()
    }
}

/// Repair `text` with the default known-name dictionary
pub fn clean(text: &str) -> String {
    DEFAULT_REPAIRER.clean(text)
}

/// True when the whole line is a page-number artifact
pub fn is_page_number(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.contains('\n') && PAGE_NUMBER_LINE.is_match(trimmed)
}

/// Stutter-tolerant, case-sensitive template for a name.
///
/// Each run of a letter becomes `L+`, each run of separators becomes `[-\t ]*`:
/// "DE-FI DOM" -> `\bD+E+[-\t ]*F+I+[-\t ]*D+O+M+\b`.
fn name_template(name: &str) -> Option<String> {
    let mut template = String::from(r"\b");
    let mut previous: Option<char> = None;
    let mut in_separator = false;
    let mut letters = 0;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if previous != Some(c) {
                template.push_str(&regex::escape(&c.to_string()));
                template.push('+');
                letters += 1;
            }
            previous = Some(c);
            in_separator = false;
        } else {
            if !in_separator && letters > 0 {
                template.push_str(r"[-\t ]*");
            }
            previous = None;
            in_separator = true;
        }
    }

    if letters == 0 {
        return None;
    }
    if in_separator {
        template.truncate(template.len() - r"[-\t ]*".len());
    }
    template.push_str(r"\b");
    Some(template)
}

/// Collapse runs of three or more identical ASCII capitals to one letter
fn collapse_letter_runs(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut result = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        if c.is_ascii_uppercase() && run >= 3 {
            result.push(c);
        } else {
            result.extend(std::iter::repeat_n(c, run));
        }
        i += run;
    }

    result
}
