//! Root field naming.

use crate::config::InflectionConfig;
use rownode_core::RowType;

/// Lower camel case: `Widget` -> `widget`, `order_line` -> `orderLine`,
/// `URLRecord` -> `urlRecord`.
pub fn lower_camel(name: &str) -> String {
    let mut words = String::new();
    let mut upper_next = false;
    for ch in name.chars() {
        if !ch.is_alphanumeric() {
            upper_next = !words.is_empty();
            continue;
        }
        if upper_next {
            words.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            words.push(ch);
        }
    }

    let chars: Vec<char> = words.chars().collect();
    let mut lead = chars.iter().take_while(|c| c.is_uppercase()).count();
    // keep the last capital of an acronym when it starts the next word
    if lead > 1 && lead < chars.len() && chars[lead].is_lowercase() {
        lead -= 1;
    }
    chars
        .iter()
        .enumerate()
        .flat_map(|(i, c)| {
            let lowered: Vec<char> = if i < lead {
                c.to_lowercase().collect()
            } else {
                vec![*c]
            };
            lowered
        })
        .collect()
}

/// Root field name for looking up one `row_type` by identifier
pub fn table_node_field(row_type: &RowType, inflection: &InflectionConfig) -> String {
    format!("{}{}", lower_camel(&row_type.name), inflection.field_suffix)
}
