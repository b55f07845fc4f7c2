//! Readable-view DDL.

use hsat_transform::ColumnAlias;

/// Double-quote an SQL identifier, doubling embedded quotes.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Render the statements that (re)create `view_name` over `source_table`.
///
/// Renamed columns are selected `AS` their alias; the rest are selected by
/// their physical name. An empty alias list selects `*`.
pub fn render_readable_view(source_table: &str, view_name: &str, aliases: &[ColumnAlias]) -> String {
    let view = quote_identifier(view_name);
    let select_list = if aliases.is_empty() {
        "    *".to_string()
    } else {
        aliases
            .iter()
            .map(|alias| {
                if alias.is_renamed() {
                    format!(
                        "    {} AS {}",
                        quote_identifier(&alias.column),
                        quote_identifier(&alias.alias)
                    )
                } else {
                    format!("    {}", quote_identifier(&alias.column))
                }
            })
            .collect::<Vec<_>>()
            .join(",\n")
    };
    format!(
        "DROP VIEW IF EXISTS {view} CASCADE;\nCREATE VIEW {view} AS\nSELECT\n{select_list}\nFROM {source};\n",
        source = quote_identifier(source_table),
    )
}
