//! Class attributes attached to generated elements.
//!
//! Rendering never depends on styling, but the published blog pages carry
//! utility classes on every element. A [`Theme`] picks a base set of
//! [`ElementClasses`]; individual entries can then be overridden.

/// Built-in class sets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Theme {
    /// Bare tags with no class attributes.
    #[default]
    Plain,
    /// Tailwind utility classes used by the blog front end.
    Tailwind,
}

impl Theme {
    /// Class set for this theme.
    #[must_use]
    pub fn classes(self) -> ElementClasses {
        match self {
            Self::Plain => ElementClasses::default(),
            Self::Tailwind => ElementClasses::tailwind(),
        }
    }

    /// Theme name as written in configuration files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Tailwind => "tailwind",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plain" => Ok(Self::Plain),
            "tailwind" => Ok(Self::Tailwind),
            other => Err(format!(
                "unknown theme '{other}' (expected 'plain' or 'tailwind')"
            )),
        }
    }
}

/// Characters a class value may not contain.
///
/// Class attributes are written into the buffer by early passes, so anything
/// a later pass matches on (emphasis, code spans, link and image brackets,
/// line endings) would be rewritten inside the attribute.
pub const RESERVED_CLASS_CHARS: &[char] = &['\n', '\r', '*', '`', '[', ']', '(', ')'];

/// A class value containing a [reserved character](RESERVED_CLASS_CHARS).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("class for {element} contains unsupported character {found:?}")]
pub struct InvalidClass {
    /// Element name as used in configuration (e.g., "h1", "list_item").
    pub element: &'static str,
    /// First reserved character found.
    pub found: char,
}

/// First reserved character in `class`, if any.
pub(crate) fn reserved_char(class: &str) -> Option<char> {
    class.chars().find(|c| RESERVED_CLASS_CHARS.contains(c))
}

/// Optional `class` attribute value for each generated element.
///
/// `None` (or an empty string) renders the bare tag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ElementClasses {
    /// `<h1>`
    pub h1: Option<String>,
    /// `<h2>`
    pub h2: Option<String>,
    /// `<h3>`
    pub h3: Option<String>,
    /// `<strong>`
    pub strong: Option<String>,
    /// `<em>`
    pub em: Option<String>,
    /// Inline `<code>`.
    pub code: Option<String>,
    /// `<pre>` wrapping fenced code.
    pub pre: Option<String>,
    /// `<a>`
    pub link: Option<String>,
    /// `<img>`
    pub image: Option<String>,
    /// `<li>`
    pub list_item: Option<String>,
    /// `<ul>`
    pub list: Option<String>,
    /// `<blockquote>`
    pub blockquote: Option<String>,
    /// `<p>`
    pub paragraph: Option<String>,
}

impl ElementClasses {
    /// Classes used by the blog's Tailwind front end.
    #[must_use]
    pub fn tailwind() -> Self {
        let class = |s: &str| Some(s.to_owned());
        Self {
            h1: class("text-3xl font-bold text-primary mt-8 mb-6"),
            h2: class("text-2xl font-bold text-primary mt-8 mb-4"),
            h3: class("text-xl font-bold text-primary mt-8 mb-4"),
            strong: class("font-semibold"),
            em: class("italic"),
            code: class("bg-muted px-1 py-0.5 rounded text-sm"),
            pre: class("bg-muted p-4 rounded-lg overflow-x-auto my-4"),
            link: class("text-accent hover:underline"),
            image: class("rounded-lg shadow-lg my-6 max-w-full"),
            list_item: class("ml-4"),
            list: class("list-disc pl-6 my-4"),
            blockquote: class("border-l-4 border-accent pl-6 italic text-muted-foreground my-8"),
            paragraph: class("mb-4"),
        }
    }

    /// Replace every entry that `overrides` sets, keeping the rest.
    #[must_use]
    pub fn merge(self, overrides: &Self) -> Self {
        let pick = |base: Option<String>, over: Option<&String>| over.cloned().or(base);
        Self {
            h1: pick(self.h1, overrides.h1.as_ref()),
            h2: pick(self.h2, overrides.h2.as_ref()),
            h3: pick(self.h3, overrides.h3.as_ref()),
            strong: pick(self.strong, overrides.strong.as_ref()),
            em: pick(self.em, overrides.em.as_ref()),
            code: pick(self.code, overrides.code.as_ref()),
            pre: pick(self.pre, overrides.pre.as_ref()),
            link: pick(self.link, overrides.link.as_ref()),
            image: pick(self.image, overrides.image.as_ref()),
            list_item: pick(self.list_item, overrides.list_item.as_ref()),
            list: pick(self.list, overrides.list.as_ref()),
            blockquote: pick(self.blockquote, overrides.blockquote.as_ref()),
            paragraph: pick(self.paragraph, overrides.paragraph.as_ref()),
        }
    }

    /// Check that no class contains a [reserved character](RESERVED_CLASS_CHARS).
    ///
    /// # Errors
    ///
    /// Returns the first offending element.
    pub fn validate(&self) -> Result<(), InvalidClass> {
        for (element, class) in self.iter() {
            if let Some(found) = reserved_char(class) {
                return Err(InvalidClass { element, found });
            }
        }
        Ok(())
    }

    /// Iterate over `(element, class)` pairs that are set.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("h1", &self.h1),
            ("h2", &self.h2),
            ("h3", &self.h3),
            ("strong", &self.strong),
            ("em", &self.em),
            ("code", &self.code),
            ("pre", &self.pre),
            ("link", &self.link),
            ("image", &self.image),
            ("list_item", &self.list_item),
            ("list", &self.list),
            ("blockquote", &self.blockquote),
            ("paragraph", &self.paragraph),
        ]
        .into_iter()
        .filter_map(|(name, class)| class.as_deref().map(|c| (name, c)))
    }
}
