// External-collaborator seams and background dispatch.

pub mod completion;
pub mod deps;
pub mod email;
pub mod knowledge;
pub mod outbox;
pub mod testing;

pub use completion::{CompletionProvider, OpenAiCompletionProvider};
pub use deps::ServerDeps;
pub use email::{EmailSender, LogOnlyEmailSender, OutboundEmail, SmtpEmailSender};
pub use knowledge::{KnowledgeIndex, KnowledgeMatch, PgVectorKnowledgeIndex};
pub use outbox::Outbox;
