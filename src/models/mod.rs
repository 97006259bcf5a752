/// A stored note. Its id is the last path segment of its page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub body: String,
}
