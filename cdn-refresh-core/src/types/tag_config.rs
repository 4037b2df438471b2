//! Tag 配置类型定义

use std::fmt;

use serde::de::value::MapAccessDeserializer;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use cdn_refresh_provider::AccessCredentials;

/// 单个 tag 解析出的刷新配置
///
/// `cdn` / `dcdn` 均为 "分组名 -> 分组配置" 映射，保持接口返回的键顺序。
/// 缺失、`null` 或空数组 (`[]`) 都视为没有分组。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TagConfig {
    #[serde(default, deserialize_with = "deserialize_groups")]
    pub cdn: Vec<NamedGroup>,
    #[serde(default, deserialize_with = "deserialize_groups")]
    pub dcdn: Vec<NamedGroup>,
}

impl TagConfig {
    /// 分组总数 (cdn + dcdn)
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.cdn.len() + self.dcdn.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.group_count() == 0
    }
}

/// 带名字的分组
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedGroup {
    pub name: String,
    pub entry: GroupEntry,
}

impl NamedGroup {
    #[must_use]
    pub fn new(name: impl Into<String>, config: GroupConfig) -> Self {
        Self {
            name: name.into(),
            entry: GroupEntry::Single(config),
        }
    }
}

/// 分组值：单个对象，或对象数组（只取第一个）
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupEntry {
    Single(GroupConfig),
    Multiple(Vec<GroupConfig>),
    /// 无法解析的分组值，保留反序列化错误信息；不影响同 tag 的其他分组
    Invalid(String),
}

impl GroupEntry {
    /// 实际使用的配置；空数组或无效值返回 `None`
    #[must_use]
    pub fn primary(&self) -> Option<&GroupConfig> {
        match self {
            Self::Single(config) => Some(config),
            Self::Multiple(configs) => configs.first(),
            Self::Invalid(_) => None,
        }
    }

    /// 无效分组的解析错误
    #[must_use]
    pub fn invalid_reason(&self) -> Option<&str> {
        match self {
            Self::Invalid(reason) => Some(reason),
            Self::Single(_) | Self::Multiple(_) => None,
        }
    }

    /// 被忽略的多余配置数量
    #[must_use]
    pub fn ignored_count(&self) -> usize {
        match self {
            Self::Single(_) | Self::Invalid(_) => 0,
            Self::Multiple(configs) => configs.len().saturating_sub(1),
        }
    }
}

// 手写而非 untagged: 派生的结构体反序列化也接受序列，`[{..}]` 会被误判为 Single
impl<'de> Deserialize<'de> for GroupEntry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(GroupEntryVisitor)
    }
}

struct GroupEntryVisitor;

impl<'de> Visitor<'de> for GroupEntryVisitor {
    type Value = GroupEntry;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a group config object or an array of group configs")
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        GroupConfig::deserialize(MapAccessDeserializer::new(map)).map(GroupEntry::Single)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut configs = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(config) = seq.next_element::<GroupConfig>()? {
            configs.push(config);
        }
        Ok(GroupEntry::Multiple(configs))
    }
}

/// 分组配置：访问凭证 + 待刷新域名
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupConfig {
    #[serde(default)]
    pub access: AccessCredentials,
    #[serde(default)]
    pub domains: Vec<String>,
}

impl GroupConfig {
    #[must_use]
    pub fn new(access: AccessCredentials, domains: Vec<String>) -> Self {
        Self { access, domains }
    }
}

/// 按出现顺序反序列化分组映射
fn deserialize_groups<'de, D>(deserializer: D) -> Result<Vec<NamedGroup>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(GroupsVisitor)
}

struct GroupsVisitor;

impl<'de> Visitor<'de> for GroupsVisitor {
    type Value = Vec<NamedGroup>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of group name to group config")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut groups = Vec::with_capacity(map.size_hint().unwrap_or(0));
        // 先缓冲为 Value，单个分组格式错误时只标记该分组
        while let Some((name, value)) = map.next_entry::<String, serde_json::Value>()? {
            let entry = GroupEntry::deserialize(value)
                .unwrap_or_else(|e| GroupEntry::Invalid(e.to_string()));
            groups.push(NamedGroup { name, entry });
        }
        Ok(groups)
    }

    // PHP 序列化空关联数组为 []
    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        if seq.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_type(de::Unexpected::Seq, &self));
        }
        Ok(Vec::new())
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Vec::new())
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Vec::new())
    }
}
