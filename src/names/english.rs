//! English inflection for field names.
//!
//! Rule tables follow the classic Rails inflector: irregular words,
//! uncountable words, then ordered suffix rules where the first match wins.
//! Only the last camel-case word of a name is inflected.

use std::sync::LazyLock;

use regex::Regex;

use super::Inflector;

/// Word pairs that do not follow the suffix rules (singular, plural).
const IRREGULAR: [(&str, &str); 6] = [
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

/// Words with no distinct plural.
const UNCOUNTABLE: [&str; 10] = [
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

/// Acronyms upper-cased after camel-casing, in application order.
#[rustfmt::skip]
pub const ACRONYMS: [&str; 36] = [
    "Api", "Ascii", "Cpu", "Css", "Dns", "Eof", "Guid", "Html", "Https", "Http", "Id", "Ip",
    "Json", "Lhs", "Qps", "Ram", "Rhs", "Rpc", "Sla", "Smtp", "Sql", "Ssh", "Tcp", "Tls", "Ttl",
    "Udp", "Ui", "Uid", "Uuid", "Uri", "Url", "Utf8", "Vm", "Xml", "Xsrf", "Xss",
];

const PLURAL_RULES: &[(&str, &str)] = &[
    (r"(quiz)$", "${1}zes"),
    (r"^(oxen)$", "${1}"),
    (r"^(ox)$", "${1}en"),
    (r"^(m|l)ice$", "${1}ice"),
    (r"^(m|l)ouse$", "${1}ice"),
    (r"(matr|vert|ind)(?:ix|ex)$", "${1}ices"),
    (r"(x|ch|ss|sh)$", "${1}es"),
    (r"([^aeiouy]|qu)y$", "${1}ies"),
    (r"(hive)$", "${1}s"),
    (r"(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
    (r"sis$", "ses"),
    (r"([ti])a$", "${1}a"),
    (r"([ti])um$", "${1}a"),
    (r"(buffal|tomat)o$", "${1}oes"),
    (r"(bu)s$", "${1}ses"),
    (r"(alias|status)$", "${1}es"),
    (r"(octop|vir)i$", "${1}i"),
    (r"(octop|vir)us$", "${1}i"),
    (r"^(ax|test)is$", "${1}es"),
    (r"us$", "uses"),
    (r"s$", "s"),
    (r"$", "s"),
];

const SINGULAR_RULES: &[(&str, &str)] = &[
    (r"(database)s$", "${1}"),
    (r"(quiz)zes$", "${1}"),
    (r"(matr)ices$", "${1}ix"),
    (r"(vert|ind)ices$", "${1}ex"),
    (r"^(ox)en$", "${1}"),
    (r"(alias|status)(es)?$", "${1}"),
    (r"(octop|vir)(us|i)$", "${1}us"),
    (r"^(a)x[ie]s$", "${1}xis"),
    (r"(cris|test)(is|es)$", "${1}is"),
    (r"(shoe)s$", "${1}"),
    (r"(o)es$", "${1}"),
    (r"(bus)(es)?$", "${1}"),
    (r"^(m|l)ice$", "${1}ouse"),
    (r"(x|ch|ss|sh)es$", "${1}"),
    (r"(m)ovies$", "${1}ovie"),
    (r"(s)eries$", "${1}eries"),
    (r"([^aeiouy]|qu)ies$", "${1}y"),
    (r"([lr])ves$", "${1}f"),
    (r"(tive)s$", "${1}"),
    (r"(hive)s$", "${1}"),
    (r"([^f])ves$", "${1}fe"),
    (r"((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$", "${1}sis"),
    (r"([ti])a$", "${1}um"),
    (r"(n)ews$", "${1}ews"),
    (r"(us)es$", "${1}"),
    (r"(ss|us)$", "${1}"),
    (r"s$", ""),
];

static PLURALS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| compile(PLURAL_RULES));
static SINGULARS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| compile(SINGULAR_RULES));

fn compile(rules: &[(&str, &'static str)]) -> Vec<(Regex, &'static str)> {
    rules
        .iter()
        .map(|(pattern, replacement)| {
            let regex = Regex::new(&format!("(?i){pattern}"))
                .expect("invalid inflection rule");
            (regex, *replacement)
        })
        .collect()
}

/// Default [`Inflector`] for English field names.
///
/// # Example
///
/// ```
/// use lineconf::names::{EnglishInflector, Inflector};
///
/// let english = EnglishInflector;
/// assert_eq!(english.pluralize("Record"), "Records");
/// assert_eq!(english.singularize("Policies"), "Policy");
/// assert_eq!(english.normalize_acronyms("GetIp"), "GetIP");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishInflector;

impl Inflector for EnglishInflector {
    fn pluralize(&self, name: &str) -> String {
        inflect(name, &PLURALS, |(singular, plural)| (singular, plural))
    }

    fn singularize(&self, name: &str) -> String {
        inflect(name, &SINGULARS, |(singular, plural)| (plural, singular))
    }

    fn normalize_acronyms(&self, name: &str) -> String {
        let mut out = name.to_owned();
        for acronym in ACRONYMS {
            out = out.replace(acronym, &acronym.to_uppercase());
        }
        out
    }
}

/// Inflects the last camel-case word of `name`.
///
/// `direction` orients an irregular pair as `(from, to)`.
fn inflect(
    name: &str,
    rules: &[(Regex, &'static str)],
    direction: fn((&'static str, &'static str)) -> (&'static str, &'static str),
) -> String {
    if name.is_empty() {
        return String::new();
    }

    let split = last_word_start(name);
    let (head, word) = name.split_at(split);
    let lower = word.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return name.to_owned();
    }

    for pair in IRREGULAR {
        let (from, to) = direction(pair);
        if lower == to {
            return name.to_owned();
        }
        if lower == from {
            return format!("{head}{}", match_case(word, to));
        }
    }

    match rules.iter().find(|(regex, _)| regex.is_match(word)) {
        Some((regex, replacement)) => format!("{head}{}", regex.replace(word, *replacement)),
        None => name.to_owned(),
    }
}

/// Byte index where the last camel-case word of `name` starts.
fn last_word_start(name: &str) -> usize {
    let mut start = 0;
    let mut prev_lower = false;

    for (idx, ch) in name.char_indices() {
        if ch.is_uppercase() && prev_lower {
            start = idx;
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
    }

    start
}

/// Copies the case of `template`'s first letter onto `word`.
fn match_case(template: &str, word: &str) -> String {
    let upper = template.chars().next().is_some_and(char::is_uppercase);
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if upper => first.to_uppercase().chain(chars).collect(),
        _ => word.to_owned(),
    }
}
