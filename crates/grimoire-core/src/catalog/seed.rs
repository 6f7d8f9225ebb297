use super::types::Scenario;

/// Scenarios used when nothing has been stored yet: one per action type of a
/// Tormenta 20 turn.
pub fn default_scenarios() -> Vec<Scenario> {
    [
        ("acao-padrao", "Ação Padrão"),
        ("acao-movimento", "Ação de Movimento"),
        ("acao-completa", "Ação Completa"),
        ("acao-livre", "Ação Livre"),
        ("reacao", "Reação"),
        ("inicio-turno", "Início do Turno"),
        ("fim-turno", "Fim do Turno"),
    ]
    .into_iter()
    .map(|(id, name)| Scenario::new(id, name))
    .collect()
}
