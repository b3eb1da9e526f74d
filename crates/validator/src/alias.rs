//! Alternate rule names.
//!
//! An [`AliasTable`] maps legacy or shorthand spellings onto one canonical
//! rule name. Lookups are exact and case-sensitive: `"Email"` and `"email"`
//! are different keys. Aliases never chain; [`AliasTable::check`] rejects a
//! mapping whose target is itself an alias.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::error::{RuleError, RuleResult};

/// Alias → canonical name pairs shipped with the built-in rules.
#[cfg(feature = "builtins")]
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    // value
    ("in", "enum"),
    ("range", "between"),
    // type
    ("int", "isInt"),
    ("integer", "isInt"),
    ("uint", "isUint"),
    ("bool", "isBool"),
    ("float", "isFloat"),
    ("map", "isMap"),
    ("ints", "isInts"),
    ("str", "isString"),
    ("string", "isString"),
    ("strings", "isStrings"),
    ("arr", "isArray"),
    ("array", "isArray"),
    ("slice", "isSlice"),
    // compare
    ("regex", "regexp"),
    ("eq", "isEqual"),
    ("equal", "isEqual"),
    ("intEq", "intEqual"),
    ("int_eq", "intEqual"),
    ("ne", "notEqual"),
    ("notEq", "notEqual"),
    ("not_eq", "notEqual"),
    // int compare
    ("lte", "max"),
    ("gte", "min"),
    ("lessThan", "lt"),
    ("less_than", "lt"),
    ("greaterThan", "gt"),
    ("greater_than", "gt"),
    // length
    ("len", "length"),
    ("lenEq", "length"),
    ("len_eq", "length"),
    ("lengthEq", "length"),
    ("minLen", "minLength"),
    ("maxLen", "maxLength"),
    ("minSize", "minLength"),
    ("min_size", "minLength"),
    ("maxSize", "maxLength"),
    ("max_size", "maxLength"),
    // char length
    ("strlen", "stringLength"),
    ("strLen", "stringLength"),
    ("str_len", "stringLength"),
    ("strLength", "stringLength"),
    ("runeLen", "stringLength"),
    ("rune_len", "stringLength"),
    ("runeLength", "stringLength"),
    // string contains
    ("string_contains", "stringContains"),
    ("str_contains", "stringContains"),
    ("startWith", "startsWith"),
    ("start_with", "startsWith"),
    ("starts_with", "startsWith"),
    ("endWith", "endsWith"),
    ("end_with", "endsWith"),
    ("ends_with", "endsWith"),
    // network / string formats
    ("ip", "isIP"),
    ("ipv4", "isIPv4"),
    ("ipv6", "isIPv6"),
    ("email", "isEmail"),
    ("intStr", "isIntString"),
    ("int_str", "isIntString"),
    ("strInt", "isIntString"),
    ("str_int", "isIntString"),
    ("intString", "isIntString"),
    ("stringNum", "isStringNumber"),
    ("string_num", "isStringNumber"),
    ("strNumber", "isStringNumber"),
    ("str_number", "isStringNumber"),
    ("strNum", "isStringNumber"),
    ("str_num", "isStringNumber"),
    ("stringNumber", "isStringNumber"),
    ("hexadecimal", "isHexadecimal"),
    ("has_whitespace", "hasWhitespace"),
    ("has_wp", "hasWhitespace"),
    ("printableASCII", "isPrintableASCII"),
    ("ascii", "isASCII"),
    ("ASCII", "isASCII"),
    ("alpha", "isAlpha"),
    ("alphaNum", "isAlphaNum"),
    ("alpha_num", "isAlphaNum"),
    ("alphaDash", "isAlphaDash"),
    ("alpha_dash", "isAlphaDash"),
    ("base64", "isBase64"),
    ("cidr", "isCIDR"),
    ("CIDR", "isCIDR"),
    ("CIDRv4", "isCIDRv4"),
    ("CIDRv6", "isCIDRv6"),
    ("dnsName", "isDNSName"),
    ("dns_name", "isDNSName"),
    ("DNSName", "isDNSName"),
    ("dataURI", "isDataURI"),
    ("data_URI", "isDataURI"),
    ("data_uri", "isDataURI"),
    ("empty", "isEmpty"),
    ("filePath", "isFilePath"),
    ("filepath", "isFilePath"),
    ("hexColor", "isHexColor"),
    ("isbn10", "isISBN10"),
    ("ISBN10", "isISBN10"),
    ("isbn13", "isISBN13"),
    ("ISBN13", "isISBN13"),
    ("json", "isJSON"),
    ("JSON", "isJSON"),
    ("lat", "isLatitude"),
    ("latitude", "isLatitude"),
    ("lon", "isLongitude"),
    ("longitude", "isLongitude"),
    ("mac", "isMAC"),
    ("multiByte", "isMultiByte"),
    ("num", "isNumber"),
    ("number", "isNumber"),
    ("numeric", "isNumeric"),
    ("rgbColor", "isRGBColor"),
    ("RGBColor", "isRGBColor"),
    ("url", "isURL"),
    ("URL", "isURL"),
    ("fullURL", "isFullURL"),
    ("fullUrl", "isFullURL"),
    ("uuid", "isUUID"),
    ("uuid3", "isUUID3"),
    ("uuid4", "isUUID4"),
    ("uuid5", "isUUID5"),
    ("UUID", "isUUID"),
    ("UUID3", "isUUID3"),
    ("UUID4", "isUUID4"),
    ("UUID5", "isUUID5"),
    ("unixPath", "isUnixPath"),
    ("winPath", "isWinPath"),
    ("cnMobile", "isCnMobile"),
    // date
    ("date", "isDate"),
    ("gtDate", "afterDate"),
    ("ltDate", "beforeDate"),
    ("gteDate", "afterOrEqualDate"),
    ("lteDate", "beforeOrEqualDate"),
];

#[cfg(not(feature = "builtins"))]
const BUILTIN_ALIASES: &[(&str, &str)] = &[];

static BUILTIN_TABLE: LazyLock<Arc<AliasTable>> =
    LazyLock::new(|| Arc::new(AliasTable::from_pairs(BUILTIN_ALIASES.iter().copied())));

/// Immutable mapping from alias to canonical rule name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide table of built-in aliases.
    pub fn builtin() -> Arc<AliasTable> {
        Arc::clone(&BUILTIN_TABLE)
    }

    /// Builds a table from `(alias, canonical)` pairs; later pairs win.
    pub fn from_pairs<A, C>(pairs: impl IntoIterator<Item = (A, C)>) -> Self
    where
        A: Into<String>,
        C: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(alias, canonical)| (alias.into(), canonical.into()))
                .collect(),
        }
    }

    /// A copy of this table with extra pairs added (or replacing existing ones).
    pub fn extended<A, C>(&self, pairs: impl IntoIterator<Item = (A, C)>) -> Self
    where
        A: Into<String>,
        C: Into<String>,
    {
        let mut entries = self.entries.clone();
        entries.extend(
            pairs
                .into_iter()
                .map(|(alias, canonical)| (alias.into(), canonical.into())),
        );
        Self { entries }
    }

    /// Resolves `name` to its canonical rule name.
    ///
    /// Names that are not aliases come back unchanged.
    ///
    /// ```
    /// use rulebook_validator::AliasTable;
    ///
    /// let table = AliasTable::from_pairs([("in", "enum")]);
    /// assert_eq!(table.resolve("in"), "enum");
    /// assert_eq!(table.resolve("enum"), "enum");
    /// assert_eq!(table.resolve("IN"), "IN");
    /// ```
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.entries.get(name).map_or(name, String::as_str)
    }

    /// Whether `alias` is a key of this table.
    pub fn contains(&self, alias: &str) -> bool {
        self.entries.contains_key(alias)
    }

    /// Canonical target of `alias`, if it is one.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.entries.get(alias).map(String::as_str)
    }

    /// Number of aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no aliases.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(alias, canonical)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(a, c)| (a.as_str(), c.as_str()))
    }

    /// All aliases of `canonical`, sorted.
    pub fn aliases_of(&self, canonical: &str) -> Vec<&str> {
        let mut aliases: Vec<&str> = self
            .iter()
            .filter(|(_, target)| *target == canonical)
            .map(|(alias, _)| alias)
            .collect();
        aliases.sort_unstable();
        aliases
    }

    /// Verifies every alias targets a registered, non-alias name.
    ///
    /// Pairs are checked in sorted order so the reported error is stable.
    pub fn check(&self, is_registered: impl Fn(&str) -> bool) -> RuleResult<()> {
        let mut pairs: Vec<(&str, &str)> = self.iter().collect();
        pairs.sort_unstable();

        for (alias, target) in pairs {
            let reason = if self.contains(target) {
                "alias chains are not allowed"
            } else if !is_registered(target) {
                "target rule is not registered"
            } else {
                continue;
            };
            return Err(RuleError::InvalidAlias {
                alias: alias.to_string(),
                target: target.to_string(),
                reason,
            });
        }
        Ok(())
    }
}
