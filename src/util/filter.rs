use entity::{Collection, Item};
use tonic::Status;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Type,
    Status,
}

static FACETS: phf::Map<&'static str, Facet> = phf_map! {
    "type" => Facet::Type,
    "types" => Facet::Type,
    "kind" => Facet::Type,
    "status" => Facet::Status,
    "statuses" => Facet::Status,
    "state" => Facet::Status,
};

impl Facet {
    pub fn from_name(name: &str) -> Result<Self, Status> {
        FACETS
            .get(name.trim().to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| Status::invalid_argument(format!("Facet with name '{}' does not exist", name)))
    }

    pub fn value<'a>(&self, item: &'a Item) -> &'a str {
        match self {
            Facet::Type => item.kind.as_str(),
            Facet::Status => item.status.as_str(),
        }
    }
}

/// Distinct values of `facet`, in order of first appearance
pub fn available_values(collection: &Collection, facet: Facet) -> Vec<String> {
    let mut values: Vec<String> = vec![];
    for item in collection {
        let value = facet.value(item);
        if !values.iter().any(|known| known == value) {
            values.push(value.to_string());
        }
    }
    values
}

/// What the gallery shows. Both facets have to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub types: Vec<String>,
    pub statuses: Vec<String>,
}

impl Selection {
    /// Everything that is currently in the collection
    pub fn all(collection: &Collection) -> Self {
        Self {
            types: available_values(collection, Facet::Type),
            statuses: available_values(collection, Facet::Status),
        }
    }

    /// A facet without a choice selects all of its values
    pub fn resolve(
        collection: &Collection,
        types: Option<Vec<String>>,
        statuses: Option<Vec<String>>,
    ) -> Self {
        let all = Self::all(collection);
        Self {
            types: types.unwrap_or(all.types),
            statuses: statuses.unwrap_or(all.statuses),
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        let selected = |values: &[String], facet: Facet| {
            values.iter().any(|value| value == facet.value(item))
        };
        selected(&self.types, Facet::Type) && selected(&self.statuses, Facet::Status)
    }
}

pub fn apply<'a>(collection: &'a Collection, selection: &Selection) -> Vec<&'a Item> {
    collection
        .iter()
        .filter(|item| selection.matches(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use entity::{Kind, NewItem, Status as ReadingStatus};

    use super::*;

    fn item(title: &str, kind: Kind, status: ReadingStatus) -> NewItem {
        NewItem {
            kind,
            status,
            ..NewItem::new(title)
        }
    }

    fn collection() -> Collection {
        let mut c = Collection::default();
        c.add(item("Berserk", Kind::Manga, ReadingStatus::InProgress));
        c.add(item("Tower of God", Kind::Webtoon, ReadingStatus::ToRead));
        c.add(item("Solo Leveling", Kind::Manhwa, ReadingStatus::Completed));
        c.add(item("Monster", Kind::Manga, ReadingStatus::Completed));
        c.add(item("Omniscient Reader", Kind::Manhwa, ReadingStatus::InProgress));
        c
    }

    fn titles(items: &[&Item]) -> Vec<String> {
        items.iter().map(|item| item.title.clone()).collect()
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn available_values_are_distinct_in_order() {
        let c = collection();

        assert_eq!(available_values(&c, Facet::Type), strings(&["Manga", "Webtoon", "Manhwa"]));
        assert_eq!(
            available_values(&c, Facet::Status),
            strings(&["InProgress", "ToRead", "Completed"])
        );
        assert!(available_values(&Collection::default(), Facet::Type).is_empty());
    }

    #[test]
    fn selecting_everything_is_identity() {
        let c = collection();

        let all = apply(&c, &Selection::all(&c));
        assert_eq!(all, c.iter().collect::<Vec<_>>());
    }

    #[test]
    fn facets_are_conjunctive_and_keep_order() {
        let c = collection();
        let selection = Selection {
            types: strings(&["Manhwa", "Manga"]),
            statuses: strings(&["InProgress", "Completed"]),
        };

        assert_eq!(
            titles(&apply(&c, &selection)),
            strings(&["Berserk", "Solo Leveling", "Monster", "Omniscient Reader"])
        );

        let selection = Selection {
            types: strings(&["Manga"]),
            statuses: strings(&["Completed"]),
        };
        assert_eq!(titles(&apply(&c, &selection)), strings(&["Monster"]));
    }

    #[test]
    fn empty_selection_shows_nothing() {
        let c = collection();
        let selection = Selection::resolve(&c, Some(vec![]), None);

        assert!(apply(&c, &selection).is_empty());
        assert_eq!(selection.statuses.len(), 3);
    }

    #[test]
    fn unknown_values_are_filterable() {
        let mut c = collection();
        c.add(item("Dune", Kind::Other("Novel".into()), ReadingStatus::ToRead));

        assert!(available_values(&c, Facet::Type).contains(&"Novel".to_string()));
        let selection = Selection::resolve(&c, Some(strings(&["Novel"])), None);
        assert_eq!(titles(&apply(&c, &selection)), strings(&["Dune"]));
    }

    #[test]
    fn facet_names() {
        assert_eq!(Facet::from_name("Type").unwrap(), Facet::Type);
        assert_eq!(Facet::from_name(" state ").unwrap(), Facet::Status);
        assert_eq!(
            Facet::from_name("rating").unwrap_err().code(),
            tonic::Code::InvalidArgument
        );
    }
}
