use models_policy::RawRecord;

/// Field dropped from derived column sets; it is an internal identifier,
/// not display data.
pub const ID_FIELD: &str = "id";

/// Alias field → canonical field. An alias column is suppressed when its
/// canonical column is already in the set.
pub const DUPLICATE_ALIASES: &[(&str, &str)] = &[
    ("policyNumber", "policyNo"),
    ("personName", "customerName"),
    ("person_name", "customerName"),
    ("product", "policyType"),
    ("policy_type", "policyType"),
    ("group_code", "groupCode"),
    ("maturity_date", "maturityDate"),
    ("sum_assured", "sumAssured"),
];

/// Union of keys across all records, preserving first-seen order, minus
/// the id field and any alias whose canonical field is present.
pub fn derive_columns<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a RawRecord>,
{
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.keys() {
            if !columns.iter().any(|existing| existing == key) {
                columns.push(key.clone());
            }
        }
    }

    columns
        .iter()
        .filter(|key| key.as_str() != ID_FIELD)
        .filter(|key| {
            let canonical = DUPLICATE_ALIASES
                .iter()
                .find(|(alias, _)| alias == key)
                .map(|(_, canonical)| *canonical);
            match canonical {
                Some(canonical) => !columns.iter().any(|other| other == canonical),
                None => true,
            }
        })
        .cloned()
        .collect()
}

/// Turns a field name into a table header: a space before interior
/// capitals, underscores to spaces, each word capitalized.
pub fn format_header(field: &str) -> String {
    let mut spaced = String::with_capacity(field.len() + 4);
    for (index, ch) in field.chars().enumerate() {
        if ch == '_' {
            spaced.push(' ');
        } else {
            if ch.is_uppercase() && index > 0 {
                spaced.push(' ');
            }
            spaced.push(ch);
        }
    }

    spaced
        .split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<String>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
