use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Title of the category option that disables filtering.
pub const ALL_CATEGORY: &str = "All";

/// Descriptions longer than this many characters are cut and get an ellipsis.
pub const DESCRIPTION_LIMIT: usize = 100;

/// Course identifier as delivered by the endpoint (number or string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CourseId::Number(n) => write!(f, "{}", n),
            CourseId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CourseId {
    fn from(n: i64) -> Self {
        CourseId::Number(n)
    }
}

impl From<&str> for CourseId {
    fn from(s: &str) -> Self {
        CourseId::Text(s.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(default)]
    pub url: String,
}

/// A single course as returned by the courses endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: ImageRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Fetched courses, either grouped by category name or as one flat list.
///
/// Group order follows the key order of the JSON object the groups came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseCollection {
    Grouped(Vec<(String, Vec<Course>)>),
    Flat(Vec<Course>),
}

impl CourseCollection {
    /// Total number of courses across every group.
    pub fn len(&self) -> usize {
        match self {
            CourseCollection::Grouped(groups) => groups.iter().map(|(_, c)| c.len()).sum(),
            CourseCollection::Flat(courses) => courses.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Courses stored under `category`, if that group exists.
    pub fn group(&self, category: &str) -> Option<&[Course]> {
        match self {
            CourseCollection::Grouped(groups) => groups
                .iter()
                .find(|(name, _)| name == category)
                .map(|(_, courses)| courses.as_slice()),
            CourseCollection::Flat(_) => None,
        }
    }
}

impl<'de> Deserialize<'de> for CourseCollection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CollectionVisitor;

        impl<'de> Visitor<'de> for CollectionVisitor {
            type Value = CourseCollection;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a list of courses or a map of category name to courses")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut courses = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(course) = seq.next_element::<Course>()? {
                    courses.push(course);
                }
                Ok(CourseCollection::Flat(courses))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut groups: Vec<(String, Vec<Course>)> = Vec::new();
                while let Some((name, courses)) = map.next_entry::<String, Vec<Course>>()? {
                    if groups.iter().any(|(existing, _)| existing == &name) {
                        return Err(de::Error::custom(format!("duplicate category `{}`", name)));
                    }
                    groups.push((name, courses));
                }
                Ok(CourseCollection::Grouped(groups))
            }
        }

        deserializer.deserialize_any(CollectionVisitor)
    }
}

/// One entry of the category filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub id: u32,
    pub title: String,
}

impl CategoryOption {
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

/// The static filter list shown above the catalog.
pub fn default_categories() -> Vec<CategoryOption> {
    vec![
        CategoryOption::new(1, ALL_CATEGORY),
        CategoryOption::new(2, "Development"),
        CategoryOption::new(3, "Business"),
        CategoryOption::new(4, "Design"),
        CategoryOption::new(5, "Lifestyle"),
    ]
}

/// Courses shown for `category`.
///
/// `All` yields every course in group order; any other category yields its
/// group, or nothing when the group is absent. An unset collection is empty.
pub fn visible_courses<'a>(
    collection: Option<&'a CourseCollection>,
    category: &str,
) -> Vec<&'a Course> {
    let Some(collection) = collection else {
        return Vec::new();
    };

    match collection {
        CourseCollection::Grouped(groups) => {
            if category == ALL_CATEGORY {
                groups.iter().flat_map(|(_, courses)| courses.iter()).collect()
            } else {
                collection
                    .group(category)
                    .map(|courses| courses.iter().collect())
                    .unwrap_or_default()
            }
        }
        CourseCollection::Flat(courses) => {
            if category == ALL_CATEGORY {
                courses.iter().collect()
            } else {
                courses
                    .iter()
                    .filter(|c| c.category.as_deref() == Some(category))
                    .collect()
            }
        }
    }
}

/// Cut a description to [`DESCRIPTION_LIMIT`] UTF-16 code units, appending "..." when cut.
///
/// The cut never splits a surrogate pair, so it may stop one unit short.
pub fn truncate_description(description: &str) -> String {
    if description.encode_utf16().count() <= DESCRIPTION_LIMIT {
        return description.to_string();
    }
    let mut units = 0;
    let mut cut = String::new();
    for c in description.chars() {
        units += c.len_utf16();
        if units > DESCRIPTION_LIMIT {
            break;
        }
        cut.push(c);
    }
    cut.push_str("...");
    cut
}

/// Outcome of toggling a course in the [`LikedSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeChange {
    Added,
    Removed,
}

/// Identifiers of the courses currently liked. Lives for the session only.
#[derive(Debug, Clone, Default)]
pub struct LikedSet {
    ids: HashSet<CourseId>,
}

impl LikedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &CourseId) -> bool {
        self.ids.contains(id)
    }

    /// Flip membership of `id`.
    pub fn toggle(&mut self, id: &CourseId) -> LikeChange {
        if self.ids.remove(id) {
            LikeChange::Removed
        } else {
            self.ids.insert(id.clone());
            LikeChange::Added
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn course(id: i64, title: &str, category: Option<&str>) -> Course {
    Course {
        id: CourseId::Number(id),
        title: title.to_string(),
        description: format!("{} description", title),
        image: ImageRef {
            url: format!("https://img.example.com/{}.png", id),
        },
        category: category.map(str::to_string),
    }
}

#[cfg(test)]
pub(crate) fn grouped_sample() -> CourseCollection {
    CourseCollection::Grouped(vec![
        ("Development".to_string(), vec![course(1, "React Course", None)]),
        ("Business".to_string(), vec![course(2, "Business 101", None)]),
    ])
}
