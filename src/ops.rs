//! Operator vocabulary for the PostgREST filter grammar.

use crate::error::PrestError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A PostgREST filter operator.
///
/// Every variant maps to one wire token in the `column=operator.value`
/// grammar. Unknown tokens are rejected at the [`FromStr`] boundary, so a
/// constructed `Operator` is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    Ilike,
    Is,
    In,
    /// Array/JSON containment (`@>`).
    Contains,
    /// Array/JSON containment-by (`<@`).
    ContainedBy,
    /// Range strictly left of (`<<`).
    StrictlyLeft,
    /// Range strictly right of (`>>`).
    StrictlyRight,
    /// Range does not extend to the left of (`&>`).
    NoExtendLeft,
    /// Range does not extend to the right of (`&<`).
    NoExtendRight,
    /// Range adjacency (`-|-`).
    Adjacent,
    /// Array/range overlap (`&&`).
    Overlaps,
    Fts,
    Plfts,
    Phfts,
    Wfts,
}

impl Operator {
    /// The wire token written after the column name.
    pub fn code(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Like => "like",
            Operator::Ilike => "ilike",
            Operator::Is => "is",
            Operator::In => "in",
            Operator::Contains => "cs",
            Operator::ContainedBy => "cd",
            Operator::StrictlyLeft => "sl",
            Operator::StrictlyRight => "sr",
            Operator::NoExtendLeft => "nxl",
            Operator::NoExtendRight => "nxr",
            Operator::Adjacent => "adj",
            Operator::Overlaps => "ov",
            Operator::Fts => "fts",
            Operator::Plfts => "plfts",
            Operator::Phfts => "phfts",
            Operator::Wfts => "wfts",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Operator {
    type Err = PrestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Operator::Eq),
            "neq" => Ok(Operator::Neq),
            "gt" => Ok(Operator::Gt),
            "gte" => Ok(Operator::Gte),
            "lt" => Ok(Operator::Lt),
            "lte" => Ok(Operator::Lte),
            "like" => Ok(Operator::Like),
            "ilike" => Ok(Operator::Ilike),
            "is" => Ok(Operator::Is),
            "in" => Ok(Operator::In),
            "cs" => Ok(Operator::Contains),
            "cd" => Ok(Operator::ContainedBy),
            "sl" => Ok(Operator::StrictlyLeft),
            "sr" => Ok(Operator::StrictlyRight),
            "nxl" => Ok(Operator::NoExtendLeft),
            "nxr" => Ok(Operator::NoExtendRight),
            "adj" => Ok(Operator::Adjacent),
            "ov" => Ok(Operator::Overlaps),
            "fts" => Ok(Operator::Fts),
            "plfts" => Ok(Operator::Plfts),
            "phfts" => Ok(Operator::Phfts),
            "wfts" => Ok(Operator::Wfts),
            other => Err(PrestError::invalid_operator(other)),
        }
    }
}

/// Full-text search variant, selecting the `fts` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TextSearchType {
    /// Plain `fts`, no prefix.
    #[default]
    Basic,
    /// `plfts` (`plainto_tsquery`).
    Plain,
    /// `phfts` (`phraseto_tsquery`).
    Phrase,
    /// `wfts` (`websearch_to_tsquery`).
    Websearch,
}

impl TextSearchType {
    /// The prefix written before `fts`.
    pub fn code(&self) -> &'static str {
        match self {
            TextSearchType::Basic => "",
            TextSearchType::Plain => "pl",
            TextSearchType::Phrase => "ph",
            TextSearchType::Websearch => "w",
        }
    }
}

impl FromStr for TextSearchType {
    type Err = PrestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Ok(TextSearchType::Basic),
            "plain" => Ok(TextSearchType::Plain),
            "phrase" => Ok(TextSearchType::Phrase),
            "websearch" => Ok(TextSearchType::Websearch),
            other => Err(PrestError::invalid_text_search_type(other)),
        }
    }
}

/// Sort direction for the `order` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
    AscNullsFirst,
    AscNullsLast,
    DescNullsFirst,
    DescNullsLast,
}

impl SortOrder {
    /// The direction suffix written after the column name.
    pub fn code(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
            SortOrder::AscNullsFirst => "asc.nullsfirst",
            SortOrder::AscNullsLast => "asc.nullslast",
            SortOrder::DescNullsFirst => "desc.nullsfirst",
            SortOrder::DescNullsLast => "desc.nullslast",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_codes() {
        assert_eq!(Operator::Eq.code(), "eq");
        assert_eq!(Operator::Contains.code(), "cs");
        assert_eq!(Operator::NoExtendLeft.code(), "nxl");
        assert_eq!(Operator::Wfts.code(), "wfts");
        assert_eq!("adj".parse::<Operator>().unwrap(), Operator::Adjacent);
    }

    #[test]
    fn test_invalid_operator_rejected() {
        let err = "bogus".parse::<Operator>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid filter operator: 'bogus'");
    }

    #[test]
    fn test_text_search_type_tokens() {
        assert_eq!("".parse::<TextSearchType>().unwrap(), TextSearchType::Basic);
        assert_eq!(
            "plain".parse::<TextSearchType>().unwrap(),
            TextSearchType::Plain
        );
        assert_eq!(
            "phrase".parse::<TextSearchType>().unwrap(),
            TextSearchType::Phrase
        );
        assert_eq!(
            "websearch".parse::<TextSearchType>().unwrap(),
            TextSearchType::Websearch
        );
        assert!("fuzzy".parse::<TextSearchType>().is_err());
    }

    #[test]
    fn test_sort_order_codes() {
        assert_eq!(SortOrder::Asc.code(), "asc");
        assert_eq!(SortOrder::DescNullsLast.code(), "desc.nullslast");
    }
}
