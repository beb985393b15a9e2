use crate::sentiment::{ResultSet, Sentiment};

/// Reviews of a single category, ready to list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub sentiment: Sentiment,
    pub reviews: Vec<String>,
}

impl CategoryView {
    pub fn for_sentiment(results: &ResultSet, sentiment: Sentiment) -> Self {
        Self {
            sentiment,
            reviews: results.reviews_with(sentiment).map(str::to_string).collect(),
        }
    }

    /// All three views in presentation order.
    pub fn all(results: &ResultSet) -> [CategoryView; 3] {
        Sentiment::ALL.map(|sentiment| Self::for_sentiment(results, sentiment))
    }

    pub fn title(&self) -> String {
        format!("{} Reviews", self.sentiment)
    }

    /// Message shown instead of an empty list.
    pub fn placeholder(&self) -> Option<String> {
        self.reviews.is_empty().then(|| {
            format!(
                "No {} reviews found.",
                self.sentiment.as_str().to_lowercase()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_split_by_label_and_keep_order() {
        let results = ResultSet::from_parts(
            vec!["a".into(), "b".into(), "c".into(), "d".into()],
            vec![
                Sentiment::Positive,
                Sentiment::Negative,
                Sentiment::Positive,
                Sentiment::Negative,
            ],
        )
        .unwrap();
        let [positive, neutral, negative] = CategoryView::all(&results);
        assert_eq!(positive.reviews, vec!["a", "c"]);
        assert_eq!(negative.reviews, vec!["b", "d"]);
        assert_eq!(positive.title(), "Positive Reviews");
        assert_eq!(positive.placeholder(), None);
        assert!(neutral.reviews.is_empty());
        assert_eq!(neutral.placeholder().as_deref(), Some("No neutral reviews found."));
    }
}
