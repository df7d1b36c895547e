//! Tiny random-weight checkpoints for exercising the real model paths in tests.
//!
//! Each writer produces a directory in the layout the loaders expect:
//! `config.json`, `model.safetensors` and a lowercase word-level `tokenizer.json`.

use std::path::Path;

use candle_core::{DType, Device, Result};
use candle_nn::{VarBuilder, VarMap};
use candle_transformers::models::{bert, distilbert};
use serde_json::{Value, json};

pub(crate) const HIDDEN: usize = 8;

const VOCAB: [&str; 16] = [
    "[PAD]", "[UNK]", "apple", "reported", "record", "iphone", "sales", "tesla", "shares",
    "plunged", "the", "board", "meets", "today", "and", "market",
];

fn bert_config() -> Value {
    json!({
        "model_type": "bert",
        "vocab_size": VOCAB.len(),
        "hidden_size": HIDDEN,
        "num_hidden_layers": 1,
        "num_attention_heads": 2,
        "intermediate_size": 16,
        "hidden_act": "gelu",
        "hidden_dropout_prob": 0.0,
        "max_position_embeddings": 32,
        "type_vocab_size": 2,
        "initializer_range": 0.02,
        "layer_norm_eps": 1e-12,
        "pad_token_id": 0
    })
}

fn distilbert_config() -> Value {
    json!({
        "model_type": "distilbert",
        "vocab_size": VOCAB.len(),
        "dim": HIDDEN,
        "n_layers": 1,
        "n_heads": 2,
        "hidden_dim": 16,
        "activation": "gelu",
        "max_position_embeddings": 32,
        "initializer_range": 0.02,
        "pad_token_id": 0
    })
}

fn with_labels(mut config: Value, labels: &[&str]) -> Value {
    let id2label: serde_json::Map<String, Value> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| (i.to_string(), Value::from(*label)))
        .collect();
    config["id2label"] = Value::Object(id2label);
    config
}

fn write_config(dir: &Path, config: &Value) -> Result<()> {
    std::fs::write(dir.join("config.json"), config.to_string())?;
    Ok(())
}

fn from_value<T: serde::de::DeserializeOwned>(config: &Value) -> Result<T> {
    serde_json::from_value(config.clone()).map_err(|e| candle_core::Error::Msg(e.to_string()))
}

pub(crate) fn write_tokenizer(dir: &Path) -> Result<()> {
    let vocab: serde_json::Map<String, Value> = VOCAB
        .iter()
        .enumerate()
        .map(|(i, word)| (word.to_string(), Value::from(i)))
        .collect();

    let tokenizer = json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": { "type": "Lowercase" },
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": { "type": "WordLevel", "vocab": vocab, "unk_token": "[UNK]" }
    });
    std::fs::write(dir.join("tokenizer.json"), tokenizer.to_string())?;
    Ok(())
}

/// sentence-transformers layout: encoder weights at the root, no head.
pub(crate) fn write_bert_encoder(dir: &Path) -> Result<()> {
    let config = bert_config();
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    bert::BertModel::load(vb, &from_value::<bert::Config>(&config)?)?;

    varmap.save(dir.join("model.safetensors"))?;
    write_config(dir, &config)?;
    write_tokenizer(dir)
}

/// `BertForSequenceClassification` layout: `bert.` backbone with pooler, `classifier` head.
pub(crate) fn write_bert_classifier(dir: &Path, labels: &[&str]) -> Result<()> {
    let config = with_labels(bert_config(), labels);
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    bert::BertModel::load(vb.pp("bert"), &from_value::<bert::Config>(&config)?)?;
    candle_nn::linear(HIDDEN, HIDDEN, vb.pp("bert").pp("pooler").pp("dense"))?;
    candle_nn::linear(HIDDEN, labels.len(), vb.pp("classifier"))?;

    varmap.save(dir.join("model.safetensors"))?;
    write_config(dir, &config)?;
    write_tokenizer(dir)
}

/// `DistilBertForSequenceClassification` layout: `distilbert.` backbone,
/// `pre_classifier` and `classifier` heads.
pub(crate) fn write_distilbert_classifier(dir: &Path, labels: &[&str]) -> Result<()> {
    let config = with_labels(distilbert_config(), labels);
    let varmap = VarMap::new();
    let vb = VarBuilder::from_varmap(&varmap, DType::F32, &Device::Cpu);
    distilbert::DistilBertModel::load(
        vb.pp("distilbert"),
        &from_value::<distilbert::Config>(&config)?,
    )?;
    candle_nn::linear(HIDDEN, HIDDEN, vb.pp("pre_classifier"))?;
    candle_nn::linear(HIDDEN, labels.len(), vb.pp("classifier"))?;

    varmap.save(dir.join("model.safetensors"))?;
    write_config(dir, &config)?;
    write_tokenizer(dir)
}
