/// Offsets of one component definition at the time of lookup.
///
/// Every field is a byte offset into the buffer the lookup ran against and
/// is stale as soon as that buffer is edited anywhere before it.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentBounds {
    pub name: String,
    /// Start of the comment lines directly above the header, or
    /// `header_start` when there are none.
    pub doc_start: usize,
    /// Start of the header line (`[export ]const Name ...`).
    pub header_start: usize,
    /// First byte of the initializer expression.
    pub rhs_start: usize,
    /// The opening body delimiter, or `rhs_start` for an initializer with
    /// no delimited body.
    pub body_start: usize,
    /// Just past the matching closing delimiter (or the expression).
    pub body_end: usize,
    /// Just past the definition terminator (`;`), or `body_end` without one.
    pub end: usize,
}

/// A definition header line found by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub line_start: usize,
    /// Just past the component name.
    pub name_end: usize,
    pub indented: bool,
}

/// A recognized per-tick callback registration, e.g.
/// `useFrame((state, delta) => { ... })`.
#[derive(Debug, Clone, PartialEq)]
pub struct TickCallback {
    pub registration: String,
    pub call_start: usize,
    pub arity: usize,
    /// The callback body's `{`.
    pub body_open: usize,
    /// The callback body's `}`.
    pub body_close: usize,
}
