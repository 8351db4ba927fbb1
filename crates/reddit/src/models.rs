use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    pub children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
pub struct Child {
    pub data: Post,
}

#[derive(Debug, Deserialize)]
pub struct Post {
    pub title: String,
}

impl Listing {
    pub fn into_titles(self) -> Vec<String> {
        self.data
            .children
            .into_iter()
            .map(|child| child.data.title)
            .collect()
    }
}
