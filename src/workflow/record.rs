//! The record collaborator interface.

/// The one contract the engine depends on from the host: reading and
/// writing a record's stored state identifier. The engine never persists
/// the value itself.
///
/// # Example
///
/// ```rust
/// use flowstate::WorkflowRecord;
///
/// #[derive(Default)]
/// struct Document {
///     state: Option<String>,
/// }
///
/// impl WorkflowRecord for Document {
///     fn stored_state(&self) -> Option<&str> {
///         self.state.as_deref()
///     }
///
///     fn set_stored_state(&mut self, identifier: &str) {
///         self.state = Some(identifier.to_string());
///     }
/// }
/// ```
pub trait WorkflowRecord {
    /// The record's stored state identifier, if any. `None` resolves to
    /// the workflow's default state.
    fn stored_state(&self) -> Option<&str>;

    /// Overwrite the stored state identifier. Called exactly once per
    /// successful commit, after validation and triggers.
    fn set_stored_state(&mut self, identifier: &str);
}
