use rand::rngs::StdRng;
use rand::{Rng, SeedableRng, seq::SliceRandom};

use super::{LogRegError, LogRegModel, softmax};

/// Training options for the logistic regression head.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub epochs: usize,
    pub learning_rate: f32,
    pub l2: f32,
    pub batch_size: usize,
    pub seed: u64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            epochs: 300,
            learning_rate: 0.5,
            l2: 1e-4,
            batch_size: 4,
            seed: 42,
        }
    }
}

/// In-memory training dataset.
#[derive(Debug, Clone)]
pub struct TrainDataset {
    pub classes: Vec<String>,
    pub x: Vec<Vec<f32>>,
    pub y: Vec<usize>,
}

/// Fit softmax regression with mini-batch gradient descent and L2 weight decay.
pub fn train_logreg(
    dataset: &TrainDataset,
    options: &TrainOptions,
) -> Result<LogRegModel, LogRegError> {
    if dataset.x.is_empty() || dataset.y.is_empty() {
        return Err(LogRegError::EmptyTrainingSet);
    }
    if dataset.x.len() != dataset.y.len() {
        return Err(LogRegError::MismatchedLabels {
            inputs: dataset.x.len(),
            labels: dataset.y.len(),
        });
    }
    let classes = dataset.classes.len();
    if classes == 0 {
        return Err(LogRegError::NoClasses);
    }
    let dim = dataset.x[0].len();
    for row in &dataset.x {
        if row.len() != dim {
            return Err(LogRegError::RowLength {
                found: row.len(),
                expected: dim,
            });
        }
    }
    if let Some(&label) = dataset.y.iter().find(|&&y| y >= classes) {
        return Err(LogRegError::LabelOutOfRange { label, classes });
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let mut weights = vec![0.0f32; classes * dim];
    let mut bias = vec![0.0f32; classes];
    for w in &mut weights {
        *w = (rng.random::<f32>() - 0.5) * 0.01;
    }

    let mut indices: Vec<usize> = (0..dataset.x.len()).collect();
    let batch_size = options.batch_size.max(1);
    let lr = options.learning_rate;
    let l2 = options.l2.max(0.0);

    for _epoch in 0..options.epochs {
        indices.shuffle(&mut rng);
        for chunk in indices.chunks(batch_size) {
            let mut grad_w = vec![0.0f32; weights.len()];
            let mut grad_b = vec![0.0f32; bias.len()];
            for &idx in chunk {
                let x = &dataset.x[idx];
                let y = dataset.y[idx];
                let logits: Vec<f32> = (0..classes)
                    .map(|c| {
                        let base = c * dim;
                        bias[c]
                            + weights[base..base + dim]
                                .iter()
                                .zip(x)
                                .map(|(w, v)| w * v)
                                .sum::<f32>()
                    })
                    .collect();
                let probs = softmax(&logits);
                for c in 0..classes {
                    let diff = probs[c] - if c == y { 1.0 } else { 0.0 };
                    let base = c * dim;
                    for i in 0..dim {
                        grad_w[base + i] += diff * x[i];
                    }
                    grad_b[c] += diff;
                }
            }
            let inv = 1.0 / chunk.len() as f32;
            for (idx, weight) in weights.iter_mut().enumerate() {
                *weight -= lr * (grad_w[idx] * inv + l2 * *weight);
            }
            for (c, b) in bias.iter_mut().enumerate() {
                *b -= lr * grad_b[c] * inv;
            }
        }
    }

    let model = LogRegModel {
        feature_dim: dim,
        classes: dataset.classes.clone(),
        weights,
        bias,
    };
    model.validate()?;
    Ok(model)
}
