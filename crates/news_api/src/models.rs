use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TopHeadlines {
    #[serde(default)]
    pub articles: Vec<Article>,
}

#[derive(Debug, Deserialize)]
pub struct Article {
    pub title: Option<String>,
}

impl TopHeadlines {
    pub fn into_titles(self) -> Vec<String> {
        self.articles.into_iter().filter_map(|a| a.title).collect()
    }
}
