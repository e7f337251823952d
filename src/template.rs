// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Symbolic placeholders recognized in header and highlight templates.
//!
//! Substitution is a single left-to-right pass: text produced by a
//! replacement is copied to the output as-is and never scanned again, so a
//! repository description containing `{repo_name}` renders literally.

/// Placeholder tokens understood by [`substitute`].
#[derive(Debug, Clone, Copy, PartialEq, Eq,)]
pub enum Placeholder
{
    /// Pluralized commit count, e.g. `1 commit` or `600 commits`.
    Commits,
    /// Link to the commit history of the window.
    CommitsUrl,
    /// Repository display name.
    RepoName,
    /// Repository home page.
    RepoUrl,
    /// Primary language or `no primary language`.
    PrimaryLanguage,
    /// Repository description or `no description`.
    RepoDescription,
    /// Already rendered header; only meaningful in highlight templates.
    Header,
}

impl Placeholder
{
    /// Every placeholder, in no particular precedence.
    pub const ALL: [Self; 7] = [
        Self::Commits,
        Self::CommitsUrl,
        Self::RepoName,
        Self::RepoUrl,
        Self::PrimaryLanguage,
        Self::RepoDescription,
        Self::Header,
    ];

    /// Returns the literal token as written in templates.
    pub const fn token(self,) -> &'static str
    {
        match self {
            Self::Commits => "{commits}",
            Self::CommitsUrl => "{commits_url}",
            Self::RepoName => "{repo_name}",
            Self::RepoUrl => "{repo_url}",
            Self::PrimaryLanguage => "{primary_language}",
            Self::RepoDescription => "{repo_description}",
            Self::Header => "{header}",
        }
    }
}

/// Replaces every placeholder in `template` with the value returned by
/// `value`. Placeholders for which `value` returns `None` are left intact.
///
/// # Examples
///
/// ```
/// use contributions_markdown::{Placeholder, substitute};
///
/// let rendered = substitute("[COOL] {header}", |placeholder| match placeholder {
///     Placeholder::Header => Some("repo".to_owned(),),
///     _ => None,
/// },);
/// assert_eq!(rendered, "[COOL] repo");
/// ```
pub fn substitute<F,>(template: &str, mut value: F,) -> String
where
    F: FnMut(Placeholder,) -> Option<String,>,
{
    let mut output = String::with_capacity(template.len(),);
    let mut rest = template;

    while let Some(open,) = rest.find('{',) {
        output.push_str(&rest[..open],);
        let candidate = &rest[open..];

        let replacement = Placeholder::ALL.iter().find_map(|placeholder| {
            let token = placeholder.token();
            if candidate.starts_with(token,) {
                value(*placeholder,).map(|text| (text, token.len(),),)
            } else {
                None
            }
        },);

        match replacement {
            Some((text, consumed,),) => {
                output.push_str(&text,);
                rest = &candidate[consumed..];
            }
            None => {
                output.push('{',);
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest,);
    output
}

#[cfg(test)]
mod tests
{
    use super::{Placeholder, substitute};

    fn fixed(placeholder: Placeholder,) -> Option<String,>
    {
        match placeholder {
            Placeholder::RepoName => Some("repo".to_owned(),),
            Placeholder::RepoDescription => Some("mentions {repo_name}".to_owned(),),
            _ => None,
        }
    }

    #[test]
    fn replaces_every_occurrence()
    {
        let rendered = substitute("{repo_name}/{repo_name}", fixed,);
        assert_eq!(rendered, "repo/repo");
    }

    #[test]
    fn replacement_text_is_not_expanded_again()
    {
        let rendered = substitute("{repo_description}", fixed,);
        assert_eq!(rendered, "mentions {repo_name}");
    }

    #[test]
    fn unknown_and_unresolved_tokens_are_kept()
    {
        let rendered = substitute("{unknown} {header} {", fixed,);
        assert_eq!(rendered, "{unknown} {header} {");
    }

    #[test]
    fn handles_multibyte_text_around_tokens()
    {
        let rendered = substitute("⭐ {repo_name} ✓", fixed,);
        assert_eq!(rendered, "⭐ repo ✓");
    }
}
