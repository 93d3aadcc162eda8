/// Errors raised by [`generate_curl`](crate::generate_curl).
///
/// All failures are fail-fast for the current invocation; there is no
/// internal recovery path. A type name that is simply absent from the
/// declaration pool is *not* an error — it degrades to an empty object or a
/// self-closing element so partial companion input still yields output.
#[derive(Debug, derive_more::Error, derive_more::Display)]
pub enum GenerateError {
    /// The method snippet or the companion declarations block is not valid
    /// surface syntax.
    #[display("invalid snippet: {message}")]
    SnippetParse {
        /// What the parser expected and what it found instead.
        message: String,
    },

    /// The snippet parsed, but contained no method declaration.
    #[display("no method declaration found in the selected snippet")]
    MethodNotFound,

    /// An interface accessor's declared return type is not a usable type
    /// reference, so no field can be synthesized for it.
    #[display("cannot synthesize a field for accessor '{accessor}': invalid type '{type_name}'")]
    TypeSynthesis {
        /// The accessor method name, e.g. `getName`.
        accessor: String,
        /// The return-type text that failed validation.
        type_name: String,
    },
}

impl GenerateError {
    pub(crate) fn snippet(message: impl Into<String>) -> Self {
        Self::SnippetParse {
            message: message.into(),
        }
    }
}
