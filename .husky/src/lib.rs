//! Pre-commit hooks installed by cargo-husky (fmt and clippy).
