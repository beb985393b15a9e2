//! Pretrained transformer classifier from `rust-bert`.
//!
//! Wraps the library's sentiment pipeline: DistilBERT fine-tuned on SST-2, fetched into
//! the `rust-bert` cache on first use. The classification head is binary, so a verdict
//! whose confidence falls below the configured threshold is reported as `neutral`.

use std::sync::Mutex;

use rust_bert::pipelines::sentiment::{
    Sentiment as Verdict, SentimentConfig, SentimentModel, SentimentPolarity,
};

use super::{ModelError, ModelPrediction, SentimentPipeline};

/// Identifier of the pretrained checkpoint behind [`TransformerModel`].
pub const TRANSFORMER_MODEL_ID: &str = "distilbert-base-uncased-finetuned-sst-2-english";

pub struct TransformerModel {
    pipeline: Mutex<SentimentModel>,
    neutral_threshold: f32,
}

impl TransformerModel {
    /// Load the checkpoint, downloading it when it is not cached yet.
    pub fn load(neutral_threshold: f32) -> Result<Self, ModelError> {
        let pipeline = SentimentModel::new(SentimentConfig::default())?;
        Ok(Self {
            pipeline: Mutex::new(pipeline),
            neutral_threshold,
        })
    }

    pub fn neutral_threshold(&self) -> f32 {
        self.neutral_threshold
    }
}

impl SentimentPipeline for TransformerModel {
    fn model_id(&self) -> &str {
        TRANSFORMER_MODEL_ID
    }

    fn predict(&self, batch: &[&str]) -> Result<Vec<ModelPrediction>, ModelError> {
        let pipeline = self
            .pipeline
            .lock()
            .map_err(|_| ModelError::Inference("transformer pipeline lock poisoned".into()))?;
        let verdicts = pipeline.predict(batch);
        if verdicts.len() != batch.len() {
            return Err(ModelError::Inference(format!(
                "transformer returned {} predictions for {} inputs",
                verdicts.len(),
                batch.len()
            )));
        }
        Ok(verdicts
            .iter()
            .map(|verdict| three_way(verdict, self.neutral_threshold))
            .collect())
    }
}

/// Fold a binary verdict into positive / neutral / negative.
fn three_way(verdict: &Verdict, neutral_threshold: f32) -> ModelPrediction {
    let score = verdict.score as f32;
    let label = if score < neutral_threshold {
        "neutral"
    } else {
        match verdict.polarity {
            SentimentPolarity::Positive => "positive",
            SentimentPolarity::Negative => "negative",
        }
    };
    ModelPrediction {
        label: label.to_string(),
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(polarity: SentimentPolarity, score: f64) -> Verdict {
        Verdict { polarity, score }
    }

    #[test]
    fn confident_verdicts_keep_their_polarity() {
        let positive = three_way(&verdict(SentimentPolarity::Positive, 0.998), 0.75);
        let negative = three_way(&verdict(SentimentPolarity::Negative, 0.91), 0.75);
        assert_eq!(positive.label, "positive");
        assert_eq!(negative.label, "negative");
        assert!((positive.score - 0.998).abs() < 1e-6);
    }

    #[test]
    fn hesitant_verdicts_become_neutral() {
        let hedged = three_way(&verdict(SentimentPolarity::Negative, 0.62), 0.75);
        assert_eq!(hedged.label, "neutral");
        let edge = three_way(&verdict(SentimentPolarity::Positive, 0.75), 0.75);
        assert_eq!(edge.label, "positive");
    }

    // Downloads the checkpoint and needs libtorch.
    #[test]
    #[ignore]
    fn pretrained_model_reads_hotel_complaints() {
        let model = TransformerModel::load(0.75).unwrap();
        let labels: Vec<String> = model
            .predict(&[
                "The location was a nightmare",
                "Check-in took forever",
                "The breakfast buffet was to die for",
            ])
            .unwrap()
            .into_iter()
            .map(|prediction| prediction.label)
            .collect();
        assert_eq!(labels, ["negative", "negative", "positive"]);
    }
}
