//! Instruction prompt sent to the model for question interpretation.

use crate::question::InfoKind;

/// Builds the extraction prompt. The user's text is embedded verbatim.
pub fn build_interpretation_prompt(question: &str) -> String {
    format!(
        "Você é um assistente de uma loja de frutas.\n\
         Interprete a pergunta do usuário e responda **apenas** em JSON\n\
         no formato exato:\n\
         {{\"fruit\": \"nome_da_fruta\", \"info\": \"{price}\" ou \"{stock}\"}}\n\
         \n\
         Não escreva mais nada além do JSON.\n\
         \n\
         Pergunta: {question}\n",
        price = InfoKind::PRICE_TOKEN,
        stock = InfoKind::STOCK_TOKEN,
    )
}
