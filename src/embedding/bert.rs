//! BERT-family backbones shared by the sentence embedder and the sentiment classifier.
//!
//! The architecture is picked from `config.json`'s `model_type`: `bert` (or absent)
//! loads a [`BertModel`], `distilbert` loads a [`DistilBertModel`].

use candle::{DType, Device, Result, Tensor};
use candle_core as candle;
use candle_core::IndexOp;
use candle_nn::{Linear, Module, VarBuilder};
use candle_transformers::models::bert::{self, BertModel};
use candle_transformers::models::distilbert::{self, DistilBertModel};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Labels used when a checkpoint's `config.json` carries no `id2label` map (SST-2 order).
const DEFAULT_LABELS: [&str; 2] = ["negative", "positive"];

#[derive(Debug, Default, Deserialize)]
struct LabelConfig {
    #[serde(default)]
    id2label: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct ArchitectureConfig {
    model_type: Option<String>,
}

/// Transformer families the loaders understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Architecture {
    Bert,
    DistilBert,
}

impl Architecture {
    /// Resolves `model_type` from a `config.json` body; a missing field means BERT.
    pub fn detect(raw_config: &str) -> Result<Self> {
        let config: ArchitectureConfig = serde_json::from_str(raw_config)
            .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))?;

        match config.model_type.as_deref() {
            None | Some("bert") => Ok(Self::Bert),
            Some("distilbert") => Ok(Self::DistilBert),
            Some(other) => Err(candle::Error::Msg(format!(
                "Unsupported model_type '{}' (expected bert or distilbert)",
                other
            ))),
        }
    }

    /// Prefix of the backbone weights in task checkpoints.
    fn prefix(self) -> &'static str {
        match self {
            Self::Bert => "bert",
            Self::DistilBert => "distilbert",
        }
    }

    fn backbone_vb<'a>(self, vb: &VarBuilder<'a>) -> VarBuilder<'a> {
        let prefix = self.prefix();
        if vb.contains_tensor(&format!("{prefix}.embeddings.word_embeddings.weight")) {
            vb.pp(prefix)
        } else {
            vb.clone()
        }
    }
}

fn read_raw_config(model_dir: &Path) -> Result<String> {
    Ok(std::fs::read_to_string(model_dir.join("config.json"))?)
}

fn parse_config<'de, T: Deserialize<'de>>(raw: &'de str) -> Result<T> {
    serde_json::from_str(raw)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse config: {}", e)))
}

fn mmap_weights(model_dir: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let weights_path = model_dir.join("model.safetensors");
    // SAFETY: the weights file is opened read-only and not modified while mapped.
    unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, device) }
}

/// Bare BERT encoder producing per-token hidden states.
#[derive(Clone)]
pub struct BertEncoder {
    model: Arc<BertModel>,
    hidden_size: usize,
}

impl BertEncoder {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let raw = read_raw_config(model_dir)?;
        if Architecture::detect(&raw)? != Architecture::Bert {
            candle::bail!("Sentence embedder requires a BERT checkpoint");
        }
        let config: bert::Config = parse_config(&raw)?;
        let vb = mmap_weights(model_dir, device)?;

        let model = BertModel::load(Architecture::Bert.backbone_vb(&vb), &config)?;

        Ok(Self {
            model: Arc::new(model),
            hidden_size: config.hidden_size,
        })
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Returns hidden states shaped `[batch, seq_len, hidden_size]`.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: Option<&Tensor>,
    ) -> Result<Tensor> {
        self.model.forward(input_ids, token_type_ids, attention_mask)
    }
}

enum ClassifierBackbone {
    Bert {
        model: BertModel,
        pooler: Option<Linear>,
    },
    DistilBert {
        model: DistilBertModel,
        pre_classifier: Linear,
    },
}

struct SequenceClassifierImpl {
    backbone: ClassifierBackbone,
    classifier: Linear,
}

impl SequenceClassifierImpl {
    fn load(vb: VarBuilder, raw_config: &str, num_labels: usize) -> Result<Self> {
        let architecture = Architecture::detect(raw_config)?;
        let backbone_vb = architecture.backbone_vb(&vb);

        let (backbone, hidden_size) = match architecture {
            Architecture::Bert => {
                let config: bert::Config = parse_config(raw_config)?;
                let hidden_size = config.hidden_size;
                let pooler = if backbone_vb.contains_tensor("pooler.dense.weight") {
                    Some(candle_nn::linear(
                        hidden_size,
                        hidden_size,
                        backbone_vb.pp("pooler").pp("dense"),
                    )?)
                } else {
                    None
                };
                let model = BertModel::load(backbone_vb, &config)?;
                (ClassifierBackbone::Bert { model, pooler }, hidden_size)
            }
            Architecture::DistilBert => {
                let config: distilbert::Config = parse_config(raw_config)?;
                let dim = config.dim;
                let pre_classifier = candle_nn::linear(dim, dim, vb.pp("pre_classifier"))?;
                let model = DistilBertModel::load(backbone_vb, &config)?;
                (
                    ClassifierBackbone::DistilBert {
                        model,
                        pre_classifier,
                    },
                    dim,
                )
            }
        };

        let classifier = candle_nn::linear(hidden_size, num_labels, vb.pp("classifier"))?;

        Ok(Self {
            backbone,
            classifier,
        })
    }

    fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        let pooled = match &self.backbone {
            ClassifierBackbone::Bert { model, pooler } => {
                let output = model.forward(input_ids, token_type_ids, Some(attention_mask))?;
                let cls_token = output.i((.., 0, ..))?;
                match pooler {
                    Some(pooler) => pooler.forward(&cls_token)?.tanh()?,
                    None => cls_token,
                }
            }
            ClassifierBackbone::DistilBert {
                model,
                pre_classifier,
            } => {
                // DistilBERT fills positions where the mask is set, so it takes the inverse
                // of the tokenizer's mask, shaped to broadcast over [batch, heads, q, k].
                let (batch, seq_len) = attention_mask.dims2()?;
                let padding = attention_mask.eq(0u32)?.reshape((batch, 1, 1, seq_len))?;
                let output = model.forward(input_ids, &padding)?;
                let cls_token = output.i((.., 0, ..))?;
                pre_classifier.forward(&cls_token)?.relu()?
            }
        };
        self.classifier.forward(&pooled)
    }
}

/// Sequence classifier with an `N`-way head; labels come from `id2label`.
#[derive(Clone)]
pub struct BertClassifier {
    inner: Arc<SequenceClassifierImpl>,
    labels: Arc<[String]>,
}

impl BertClassifier {
    pub fn load<P: AsRef<Path>>(model_dir: P, device: &Device) -> Result<Self> {
        let model_dir = model_dir.as_ref();
        let raw = read_raw_config(model_dir)?;
        let labels = parse_labels(&raw)?;
        let vb = mmap_weights(model_dir, device)?;

        let model = SequenceClassifierImpl::load(vb, &raw, labels.len())?;

        Ok(Self {
            inner: Arc::new(model),
            labels: labels.into(),
        })
    }

    /// Returns logits shaped `[batch, num_labels]`.
    ///
    /// `token_type_ids` is ignored by DistilBERT checkpoints.
    pub fn forward(
        &self,
        input_ids: &Tensor,
        token_type_ids: &Tensor,
        attention_mask: &Tensor,
    ) -> Result<Tensor> {
        self.inner.forward(input_ids, token_type_ids, attention_mask)
    }

    pub fn architecture(&self) -> Architecture {
        match self.inner.backbone {
            ClassifierBackbone::Bert { .. } => Architecture::Bert,
            ClassifierBackbone::DistilBert { .. } => Architecture::DistilBert,
        }
    }

    /// Raw label names in logit order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Reads `id2label` from a `config.json` body, ordered by label index.
pub(crate) fn parse_labels(raw_config: &str) -> Result<Vec<String>> {
    let config: LabelConfig = serde_json::from_str(raw_config)
        .map_err(|e| candle::Error::Msg(format!("Failed to parse id2label: {}", e)))?;

    if config.id2label.is_empty() {
        return Ok(DEFAULT_LABELS.iter().map(|s| s.to_string()).collect());
    }

    let mut indexed = config
        .id2label
        .into_iter()
        .map(|(idx, label)| {
            idx.parse::<usize>()
                .map(|i| (i, label))
                .map_err(|_| candle::Error::Msg(format!("Non-numeric id2label key: {}", idx)))
        })
        .collect::<Result<Vec<_>>>()?;
    indexed.sort_by_key(|(i, _)| *i);

    Ok(indexed.into_iter().map(|(_, label)| label).collect())
}
