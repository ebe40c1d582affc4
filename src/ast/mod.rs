/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the expression tree
///
/// Submodules:
/// - ast: Node variants, node references and their arena storage
/// - printer: S-expression rendering of a tree
pub mod ast;
pub mod printer;

#[cfg(test)]
mod tests;
