//! Prompt text for the suggestion service
//!
//! Answers are requested in Portuguese and restricted to the Tormenta 20
//! (Jogo do Ano) rulebook.

use super::types::CharacterProfile;

pub const SKILL_SYSTEM_INSTRUCTION: &str = "Você é um assistente especialista em Tormenta 20 \
Edição Jogo do Ano. Sua função é sugerir poderes e habilidades existentes no livro de regras, \
baseando-se na descrição do personagem. Você NUNCA deve inventar um poder. Forneça o nome exato \
do poder, sua descrição resumida, o custo em PM (Pontos de Mana) se houver, e a origem do poder \
(ex: \"Guerreiro\", \"Wynna\", \"Humano\", \"Poder Geral\"). Se não houver custo em PM, omita o \
campo manaCost. Se a origem não for específica (como um Poder Geral), pode omitir o campo origin. \
Sugira até 3 poderes relevantes. Sempre responda em português.";

pub const SCENARIO_SYSTEM_INSTRUCTION: &str = "Você é um Mestre de Jogo experiente em Tormenta 20. \
Sua função é sugerir nomes de cenários de combate ou categorias de ações úteis para um jogador \
organizar seus poderes, com base na descrição do personagem. Os nomes devem ser curtos e diretos \
(ex: 'Ataques Corpo-a-Corpo', 'Magias de Suporte', 'Perícias Sociais'). Forneça uma breve \
descrição (uma frase) para cada cenário sugerido. Sugira de 3 a 5 cenários relevantes. Sempre \
responda em português.";

fn describe(profile: &CharacterProfile) -> String {
    format!(
        "Raça: {}, Classe: {}, Divindade: {}, Nível: {}, Característica marcante: {}.",
        profile.race.trim(),
        profile.class.trim(),
        profile.deity_or_default(),
        profile.level.trim(),
        profile.notable_trait.trim()
    )
}

pub fn skill_prompt(scenario_name: &str, profile: &CharacterProfile) -> String {
    format!(
        "Para o cenário de combate \"{}\", sugira poderes de Tormenta 20 para o seguinte personagem: {}",
        scenario_name,
        describe(profile)
    )
}

pub fn scenario_prompt(profile: &CharacterProfile) -> String {
    format!(
        "Sugira cenários de combate para o seguinte personagem de Tormenta 20: {}",
        describe(profile)
    )
}
