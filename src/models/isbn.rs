use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// 国际标准书号
///
/// 保存规范化后的文本：去掉空白与连字符，只接受 10 位或 13 位。
/// ISBN-10 的最后一位允许为 `X`。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Isbn(String);

/// ISBN 格式错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("无效的 ISBN: '{0}'")]
pub struct InvalidIsbn(pub String);

impl Isbn {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Isbn {
    type Err = InvalidIsbn;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let valid = match normalized.len() {
            13 => normalized.chars().all(|c| c.is_ascii_digit()),
            10 => normalized
                .char_indices()
                .all(|(i, c)| c.is_ascii_digit() || (i == 9 && c == 'X')),
            _ => false,
        };

        if valid {
            Ok(Self(normalized))
        } else {
            Err(InvalidIsbn(raw.to_string()))
        }
    }
}

impl TryFrom<String> for Isbn {
    type Error = InvalidIsbn;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Isbn> for String {
    fn from(isbn: Isbn) -> Self {
        isbn.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
