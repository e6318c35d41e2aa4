mod user;
pub use user::User;

mod claims;
pub use claims::{AuthUser, Claims, UserData};

mod choices;
pub use choices::{InvalidChoice, Language, Style};

pub mod snippets;
pub use snippets::{Snippet, SnippetFields};
