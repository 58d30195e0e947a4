//! Generative-text service.
//!
//! Wraps the generative-text collaborator with the two fixed prompt
//! templates. The generated output is returned unparsed: quiz-question
//! generation does not check that the model produced well-formed JSON.

use std::sync::Arc;

use crate::traits::TextGenerator;
use crate::{Error, Result};

/// Topic-driven content generation.
#[derive(Clone)]
pub struct GenerationService {
    generator: Arc<dyn TextGenerator>,
}

impl GenerationService {
    /// Create the service over a text generator.
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Generate an educational text on a topic.
    pub async fn educational_text(&self, topic: &str) -> Result<String> {
        let topic = non_empty_topic(topic)?;
        self.generator.generate(&content_prompt(topic)).await
    }

    /// Generate multiple-choice quiz questions on a topic.
    ///
    /// The model is asked for a JSON array but the response is passed
    /// through as-is.
    pub async fn quiz_questions(&self, topic: &str) -> Result<String> {
        let topic = non_empty_topic(topic)?;
        self.generator.generate(&quiz_prompt(topic)).await
    }
}

fn non_empty_topic(topic: &str) -> Result<&str> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(Error::Validation("missing required field 'topic'".to_string()));
    }
    Ok(topic)
}

fn content_prompt(topic: &str) -> String {
    format!(
        "Aja como um especialista em biogás e energias renováveis. Crie um texto educativo \
         detalhado, claro e bem estruturado sobre o seguinte tópico: \"{topic}\". O texto deve \
         ser adequado para um público leigo mas interessado, como pequenos agricultores ou \
         estudantes. Organize o conteúdo com títulos e parágrafos curtos."
    )
}

fn quiz_prompt(topic: &str) -> String {
    format!(
        "Crie 5 perguntas de múltipla escolha sobre o tópico de biogás: \"{topic}\". Formate a \
         resposta EXATAMENTE como um array de objetos JSON, sem nenhum texto ou formatação \
         adicional antes ou depois. Cada objeto deve ter as chaves \"question\" (string), \
         \"options\" (um array de 4 strings) e \"correct\" (o índice da resposta correta, de 0 \
         a 3). Exemplo: [{{\"question\": \"...\", \"options\": [\"a\", \"b\", \"c\", \"d\"], \
         \"correct\": 0}}]"
    )
}
