use syn::Ident;

/// Generate one local identifier per column read by `populate`, e.g. `__column_0`, `__column_1`, ...
pub fn column_idents(count: usize) -> Vec<Ident> {
    (0..count)
        .map(|index| quote::format_ident!("__column_{index}"))
        .collect()
}
