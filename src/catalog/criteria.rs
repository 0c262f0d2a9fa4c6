/// One independently filterable dimension of the gallery.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facet {
    Search,
    Taxa,
    Species,
    Origin,
}

impl Facet {
    /// Categorical facets in their declared evaluation order.
    pub const CATEGORICAL: [Facet; 3] = [Facet::Taxa, Facet::Species, Facet::Origin];
}

/// Current user-chosen facet values. An empty string means the facet is
/// unconstrained; each facet holds at most one value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CriteriaState {
    pub search: String,
    pub taxa: String,
    pub species: String,
    pub origin: String,
}

impl CriteriaState {
    pub fn get(&self, facet: Facet) -> &str {
        match facet {
            Facet::Search => &self.search,
            Facet::Taxa => &self.taxa,
            Facet::Species => &self.species,
            Facet::Origin => &self.origin,
        }
    }

    pub fn set(&mut self, facet: Facet, value: impl Into<String>) {
        let value = value.into();
        match facet {
            Facet::Search => self.search = value,
            Facet::Taxa => self.taxa = value,
            Facet::Species => self.species = value,
            Facet::Origin => self.origin = value,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search.trim().is_empty()
            && self.taxa.is_empty()
            && self.species.is_empty()
            && self.origin.is_empty()
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Clears the categorical facets only, leaving the search text as is.
    pub fn clear_categorical(&mut self) {
        for facet in Facet::CATEGORICAL {
            self.set(facet, "");
        }
    }
}
