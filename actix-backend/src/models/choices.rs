use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("\"{0}\" is not a valid choice.")]
pub struct InvalidChoice(pub String);

// Each entry is `Variant => ("wire name", "syntect name")`.
macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => ($key:literal, $target:literal),)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $key)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $key,)+
                }
            }

            fn target(&self) -> &'static str {
                match self {
                    $($name::$variant => $target,)+
                }
            }
        }

        impl FromStr for $name {
            type Err = InvalidChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($key => Ok($name::$variant),)+
                    other => Err(InvalidChoice(other.to_string())),
                }
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidChoice;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum! {
    /// Source language of a snippet, named the way Pygments names its lexers.
    pub enum Language {
        Bash => ("bash", "Bourne Again Shell (bash)"),
        C => ("c", "C"),
        Clojure => ("clojure", "Clojure"),
        Cpp => ("cpp", "C++"),
        CSharp => ("csharp", "C#"),
        Css => ("css", "CSS"),
        D => ("d", "D"),
        Diff => ("diff", "Diff"),
        Erlang => ("erlang", "Erlang"),
        Go => ("go", "Go"),
        Groovy => ("groovy", "Groovy"),
        Haskell => ("haskell", "Haskell"),
        Html => ("html", "HTML"),
        Java => ("java", "Java"),
        JavaScript => ("javascript", "JavaScript"),
        Json => ("json", "JSON"),
        Latex => ("latex", "LaTeX"),
        Lisp => ("lisp", "Lisp"),
        Lua => ("lua", "Lua"),
        Make => ("make", "Makefile"),
        Markdown => ("markdown", "Markdown"),
        Matlab => ("matlab", "MATLAB"),
        ObjectiveC => ("objective-c", "Objective-C"),
        OCaml => ("ocaml", "OCaml"),
        Perl => ("perl", "Perl"),
        Php => ("php", "PHP"),
        Python => ("python", "Python"),
        R => ("r", "R"),
        Ruby => ("ruby", "Ruby"),
        Rust => ("rust", "Rust"),
        Scala => ("scala", "Scala"),
        Sql => ("sql", "SQL"),
        Tcl => ("tcl", "Tcl"),
        Text => ("text", "Plain Text"),
        Xml => ("xml", "XML"),
        Yaml => ("yaml", "YAML"),
    }
}

choice_enum! {
    /// Colour scheme used when rendering the highlighted page.
    pub enum Style {
        Default => ("default", "InspiredGitHub"),
        Friendly => ("friendly", "InspiredGitHub"),
        Monokai => ("monokai", "base16-mocha.dark"),
        Native => ("native", "base16-ocean.dark"),
        SolarizedDark => ("solarized-dark", "Solarized (dark)"),
        SolarizedLight => ("solarized-light", "Solarized (light)"),
        Tango => ("tango", "base16-ocean.light"),
        Zenburn => ("zenburn", "base16-eighties.dark"),
    }
}

impl Language {
    pub fn syntax_name(&self) -> &'static str {
        self.target()
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Python
    }
}

impl Style {
    pub fn theme_name(&self) -> &'static str {
        self.target()
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::Friendly
    }
}
