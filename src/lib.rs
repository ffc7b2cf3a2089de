//! Password policy validation library
//!
//! This library validates passwords against configurable policies (length,
//! character classes, dictionary membership, guessable personal data) and
//! produces human-readable violation messages. The dictionary and
//! guessable-data rules detect disguised forms of forbidden words through a
//! candidate-generation pipeline: composable [`format::Formatter`]s expand a
//! password into case-folded, leetspeak-decoded, substring and combinatorial
//! variants, represented compactly as a shared-prefix [`CharTree`] instead of
//! materializing every variant string.
//!
//! # Features
//!
//! - `async` (default): Enables policy validation with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_WORDLIST_PATH`: Custom path to the word list file
//!   (default: `./assets/wordlist.txt`)
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use pwd_policy::{
//!     Coder, DictionaryRule, LengthRule, LowerCase, MemoryWordList, Password,
//!     PasswordPolicy,
//! };
//!
//! let word_list = Arc::new(MemoryWordList::from_words(["password", "qwerty"]));
//! let policy = PasswordPolicy::new()
//!     .rule(Box::new(LengthRule::new(8, None).unwrap()))
//!     .rule(Box::new(
//!         DictionaryRule::new(word_list)
//!             .formatter(Box::new(LowerCase))
//!             .formatter(Box::new(Coder::leetspeak())),
//!     ));
//!
//! let password = Password::from_plain("myP4ssw0rd!");
//!
//! #[cfg(feature = "async")]
//! let report = policy.validate(&password, None).unwrap();
//!
//! #[cfg(not(feature = "async"))]
//! let report = policy.validate(&password).unwrap();
//!
//! assert!(!report.is_satisfied());
//! for violation in &report.violations {
//!     println!("{}: {}", violation.rule, violation.message);
//! }
//! ```

// Internal modules
pub mod format;
mod password;
mod policy;
pub mod rules;
mod tree;
mod word_list;

// Public API
pub use format::{
    Capitalize, CodeMap, Coder, Combiner, ConstructionError, Formatter, LengthFilter, LowerCase,
    MixedCase, Pipeline, SubstringGenerator, Truncator, UpperCase,
};
pub use password::{GuessableData, Password};
pub use policy::{PasswordPolicy, PolicyReport};
pub use rules::{
    CharacterClass, CharacterClassRule, CountConstraint, DictionaryRule, GuessableDataRule,
    LengthRule, PatternRule, Rule, RuleError, Violation,
};
pub use tree::{CharTree, Strings};
pub use word_list::{
    get_word_list_path, BackingStoreError, MemoryWordList, WordList, WordListError,
};

#[cfg(feature = "async")]
pub use policy::validate_tx;
