//! Form field extraction

use std::collections::BTreeMap;

/// Named fields of a submitted form. Duplicate names keep the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: BTreeMap<String, String>,
}

impl FormData {
    /// Parse an `application/x-www-form-urlencoded` body.
    pub fn parse(body: &str) -> Self {
        Self::from_pairs(url::form_urlencoded::parse(body.as_bytes()).into_owned())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields = BTreeMap::new();
        for (k, v) in pairs {
            fields.insert(k.into(), v.into());
        }
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        self.fields.clear();
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_body() {
        let form = FormData::parse("name=Foo+Bar&repository=https%3A%2F%2Fgit.example%2Ffoo&tag=a&tag=b");
        assert_eq!(form.get("name"), Some("Foo Bar"));
        assert_eq!(form.get("repository"), Some("https://git.example/foo"));
        assert_eq!(form.get("tag"), Some("b"));
        assert_eq!(form.get("missing"), None);
    }

    #[test]
    fn test_reset() {
        let mut form = FormData::from_pairs([("name", "x")]);
        form.reset();
        assert!(form.is_empty());
    }
}
