/// A wrestler as listed on a season-scoped team roster.
///
/// `name` is normalized to "First Last" order; the raw roster text is kept
/// as-is when it does not match the expected "Last, First" shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub id: u32,
    pub name: String,
    pub slug: String,
}
