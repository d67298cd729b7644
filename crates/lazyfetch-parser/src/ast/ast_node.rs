use crate::token::JavaToken;

/// Trait implemented by all AST node types. Provides token traversal and
/// source reconstruction.
///
/// All AST node types implement this trait via `#[inherent] impl AstNode`,
/// giving each node both inherent methods (no trait import needed) and a
/// trait bound for generic utilities.
///
/// Reconstruction is always lossless: tokens carry their preceding trivia,
/// so [`append_source`](AstNode::append_source) emits each token's trivia
/// followed by its text, in tree order. Nodes that were synthesized rather
/// than lexed print whatever trivia their tokens were given.
pub trait AstNode<'src> {
    /// Calls `f` on every token of this node, in source order.
    fn for_each_token<'a>(&'a self, f: &mut dyn FnMut(&'a JavaToken<'src>));

    /// Append this node's source text (including leading trivia) to `sink`.
    fn append_source(&self, sink: &mut String) {
        self.for_each_token(&mut |token| token.append_source(sink));
    }

    /// Return this node as a source string.
    ///
    /// Convenience wrapper around [`append_source`](AstNode::append_source).
    fn to_source(&self) -> String {
        let mut s = String::new();
        self.append_source(&mut s);
        s
    }

    /// Returns the first token of this node, if it has any.
    fn first_token(&self) -> Option<&JavaToken<'src>> {
        let mut first = None;
        self.for_each_token(&mut |token| {
            if first.is_none() {
                first = Some(token);
            }
        });
        first
    }
}
