use std::fmt::Display;

/// An email address accepted onto the waitlist.
///
/// Validation is a deliberately loose syntactic check, not RFC parsing: it
/// only rejects obvious garbage before an external API call is spent on it.
/// The provider performs its own validation on top.
#[derive(Debug)]
pub struct SignupEmail(String);

impl SignupEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        if matches_loose_pattern(&s) {
            Ok(Self(s))
        } else {
            Err(format!("{s} is not a valid signup email."))
        }
    }
}

/// Unanchored match for `<local>@<something>.<something>`: at least one
/// non-`@`, non-whitespace character before an `@`, then at least one
/// character, a `.`, and at least one more character after it.
///
/// This accepts addresses full validation would reject (`a@@b.c` passes) and
/// rejects some valid ones (dotless domains). Accepted product behavior.
fn matches_loose_pattern(s: &str) -> bool {
    s.char_indices()
        .filter(|&(_, c)| c == '@')
        .any(|(at, _)| {
            let local_ok = s[..at].chars().any(|c| c != '@' && !c.is_whitespace());
            let rest = &s[at + 1..];
            let domain_ok = rest
                .char_indices()
                .filter(|&(_, c)| c == '.')
                .any(|(dot, _)| dot >= 1 && dot + 1 < rest.len());
            local_ok && domain_ok
        })
}

impl Display for SignupEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SignupEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
