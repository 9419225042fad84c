/// Optional allow-list of event name prefixes, compared case-insensitively.
///
/// No prefixes means every name is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixAllowList {
    prefixes: Option<Vec<String>>,
}

impl PrefixAllowList {
    pub fn allow_all() -> Self {
        Self { prefixes: None }
    }

    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let prefixes: Vec<String> = prefixes
            .into_iter()
            .map(|p| p.as_ref().trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();

        if prefixes.is_empty() {
            Self::allow_all()
        } else {
            Self {
                prefixes: Some(prefixes),
            }
        }
    }

    /// 解析逗號分隔的前綴清單
    ///
    /// Entries are trimmed and blank ones skipped, so `"Foo, Bar"` allows
    /// `"BarX"` and `"Foo,"` filters on `Foo` alone. A plain comma split would
    /// keep `" Bar"` and an empty prefix that matches every name.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn is_filtering(&self) -> bool {
        self.prefixes.is_some()
    }

    /// Lower-cased prefixes, if filtering.
    pub fn prefixes(&self) -> Option<&[String]> {
        self.prefixes.as_deref()
    }

    pub fn allows(&self, name: &str) -> bool {
        match &self.prefixes {
            None => true,
            Some(prefixes) => {
                let name = name.to_lowercase();
                prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
            }
        }
    }
}
