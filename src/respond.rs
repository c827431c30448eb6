//! Suggested-response generation.
//!
//! Picks a reply template from fixed pools, keyed by category, a topic
//! guessed from keyword presence, and the classification confidence.
//! The random choice is driven by an injected RNG so callers can seed it
//! for deterministic output.

use rand::Rng;

use crate::classify::types::Category;

// ── Template pools ──────────────────────────────────────────────────

const WORK_TEMPLATES: &[&str] = &[
    "Obrigado pelo seu email. Vou analisar as informações e retornarei em breve com uma resposta detalhada.",
    "Perfeito! Este é um assunto importante que merece nossa atenção. Vou agendar uma reunião para discutirmos em detalhes.",
    "Excelente proposta! Gostaria de agendar uma conversa para explorarmos melhor essa oportunidade.",
    "Obrigado pelo contato profissional. Vou revisar o material e entrarei em contato nos próximos dias.",
    "Interessante! Este projeto parece muito promissor. Vou analisar a viabilidade e retornarei com feedback.",
];

const PROFESSIONAL_TEMPLATES: &[&str] = &[
    "Obrigado pelo interesse em nossa empresa. Vou analisar seu perfil e entrarei em contato em breve.",
    "Perfeito! Sua experiência é muito relevante. Vou agendar uma entrevista para conhecermos melhor.",
    "Excelente currículo! Vou compartilhar com nossa equipe de RH e retornarei com informações sobre o processo seletivo.",
    "Obrigado pela candidatura. Vou analisar suas qualificações e entrarei em contato em breve.",
    "Interessante perfil! Vou agendar uma conversa para discutirmos as oportunidades disponíveis.",
];

const COMMERCIAL_TEMPLATES: &[&str] = &[
    "Obrigado pelo interesse em nossos produtos/serviços. Vou preparar uma proposta personalizada para você.",
    "Perfeito! Vou analisar suas necessidades e retornarei com uma solução adequada.",
    "Excelente oportunidade! Vou agendar uma demonstração para apresentarmos nossas soluções.",
    "Obrigado pelo contato comercial. Vou preparar um orçamento detalhado e entrarei em contato em breve.",
    "Interessante projeto! Vou analisar a viabilidade e retornarei com uma proposta comercial.",
];

const SPAM_TEMPLATES: &[&str] = &[
    "Obrigado pelo contato, mas não posso participar deste tipo de proposta.",
    "Agradeço o envio, mas não tenho interesse neste tipo de oportunidade.",
    "Obrigado, mas não posso atender a este tipo de solicitação.",
    "Agradeço o contato, mas não posso participar desta iniciativa.",
    "Obrigado, mas não tenho interesse neste tipo de proposta.",
];

const CHAIN_TEMPLATES: &[&str] = &[
    "Obrigado pelo envio, mas não participo de correntes de email.",
    "Agradeço o contato, mas não encaminho correntes de email.",
    "Obrigado, mas não participo deste tipo de corrente.",
    "Agradeço o envio, mas não posso participar de correntes.",
    "Obrigado, mas não encaminho correntes de email.",
];

const AGGRESSIVE_MARKETING_TEMPLATES: &[&str] = &[
    "Obrigado pelo contato, mas não tenho interesse em promoções agressivas.",
    "Agradeço a oferta, mas não posso aceitar este tipo de proposta.",
    "Obrigado, mas não tenho interesse em ofertas limitadas.",
    "Agradeço o contato, mas não posso aceitar esta oferta.",
    "Obrigado, mas não tenho interesse em promoções imperdíveis.",
];

const PHISHING_TEMPLATES: &[&str] = &[
    "Obrigado pelo contato, mas não forneço informações pessoais por email.",
    "Agradeço o aviso, mas não clico em links suspeitos.",
    "Obrigado, mas não verifico contas através de links em email.",
    "Agradeço o contato, mas não atualizo dados pessoais por email.",
    "Obrigado, mas não clico em links de verificação de conta.",
];

const NEUTRAL_TEMPLATES: &[&str] = &[
    "Obrigado pelo seu email. Vou analisar o conteúdo e retornarei em breve.",
    "Agradeço o contato. Vou revisar as informações e entrarei em contato em breve.",
    "Obrigado pela mensagem. Vou analisar o assunto e retornarei em breve.",
    "Agradeço o email. Vou revisar o conteúdo e entrarei em contato em breve.",
    "Obrigado pelo contato. Vou analisar as informações e retornarei em breve.",
];

// ── Topic detection ─────────────────────────────────────────────────

/// Topic of a productive email, used only for template choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductiveTopic {
    Work,
    Professional,
    Commercial,
}

/// Topic of an unproductive email, used only for template choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnproductiveTopic {
    Spam,
    Chain,
    AggressiveMarketing,
    Phishing,
}

const WORK_HINTS: &[&str] = &["reunião", "projeto", "cliente", "negócio", "estratégia", "deadline"];
const PROFESSIONAL_HINTS: &[&str] = &["curriculum", "cv", "entrevista", "vaga", "emprego", "carreira"];
const COMMERCIAL_HINTS: &[&str] = &["venda", "compra", "produto", "serviço", "preço", "oferta"];

const SPAM_HINTS: &[&str] = &["corrente", "sorte", "loteria", "herança", "prêmio", "ganhe"];
const CHAIN_HINTS: &[&str] = &["fwd:", "reencaminhar", "encaminhar", "passe adiante", "envie para"];
const AGGRESSIVE_HINTS: &[&str] = &[
    "promoção imperdível",
    "oferta limitada",
    "última chance",
    "não perca",
];
const PHISHING_HINTS: &[&str] = &[
    "verificar conta",
    "atualizar dados",
    "confirmar identidade",
    "segurança",
];

fn hint_count(content_lower: &str, hints: &[&str]) -> usize {
    hints.iter().filter(|h| content_lower.contains(*h)).count()
}

/// Guess the productive topic from keyword presence. Ties go to the
/// earlier topic (work, then professional, then commercial).
pub fn productive_topic(content: &str) -> ProductiveTopic {
    let lower = content.to_lowercase();
    let scored = [
        (ProductiveTopic::Work, hint_count(&lower, WORK_HINTS)),
        (ProductiveTopic::Professional, hint_count(&lower, PROFESSIONAL_HINTS)),
        (ProductiveTopic::Commercial, hint_count(&lower, COMMERCIAL_HINTS)),
    ];
    first_max(&scored)
}

/// Guess the unproductive topic from keyword presence. Ties go to the
/// earlier topic (spam first).
pub fn unproductive_topic(content: &str) -> UnproductiveTopic {
    let lower = content.to_lowercase();
    let scored = [
        (UnproductiveTopic::Spam, hint_count(&lower, SPAM_HINTS)),
        (UnproductiveTopic::Chain, hint_count(&lower, CHAIN_HINTS)),
        (UnproductiveTopic::AggressiveMarketing, hint_count(&lower, AGGRESSIVE_HINTS)),
        (UnproductiveTopic::Phishing, hint_count(&lower, PHISHING_HINTS)),
    ];
    first_max(&scored)
}

/// First entry with the maximum score (ties keep the earliest).
fn first_max<T: Copy>(scored: &[(T, usize)]) -> T {
    scored
        .iter()
        .fold(scored[0], |best, &cand| if cand.1 > best.1 { cand } else { best })
        .0
}

// ── Selection ───────────────────────────────────────────────────────

fn pick<'a>(pool: &[&'a str], rng: &mut impl Rng) -> &'a str {
    pool[rng.gen_range(0..pool.len())]
}

/// Pick a suggested reply for a classified email.
///
/// Confidence tiers: ≥0.9 gets an emphatic suffix, [0.8, 0.9) gets the
/// plain template, below 0.8 falls back to a neutral template with a
/// softer suffix.
pub fn suggest_response(
    category: Category,
    content: &str,
    confidence: f32,
    rng: &mut impl Rng,
) -> String {
    match category {
        Category::Productive => {
            let pool = match productive_topic(content) {
                ProductiveTopic::Work => WORK_TEMPLATES,
                ProductiveTopic::Professional => PROFESSIONAL_TEMPLATES,
                ProductiveTopic::Commercial => COMMERCIAL_TEMPLATES,
            };
            if confidence >= 0.9 {
                format!(
                    "{} Estou confiante de que podemos trabalhar juntos neste projeto.",
                    pick(pool, rng)
                )
            } else if confidence >= 0.8 {
                pick(pool, rng).to_string()
            } else {
                format!(
                    "{} Gostaria de entender melhor suas necessidades.",
                    pick(NEUTRAL_TEMPLATES, rng)
                )
            }
        }
        Category::Unproductive => {
            let pool = match unproductive_topic(content) {
                UnproductiveTopic::Spam => SPAM_TEMPLATES,
                UnproductiveTopic::Chain => CHAIN_TEMPLATES,
                UnproductiveTopic::AggressiveMarketing => AGGRESSIVE_MARKETING_TEMPLATES,
                UnproductiveTopic::Phishing => PHISHING_TEMPLATES,
            };
            if confidence >= 0.9 {
                format!("{} Por favor, não envie mais este tipo de email.", pick(pool, rng))
            } else if confidence >= 0.8 {
                pick(pool, rng).to_string()
            } else {
                format!(
                    "{} Por favor, entre em contato apenas para assuntos profissionais.",
                    pick(NEUTRAL_TEMPLATES, rng)
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn seeded_rng_is_deterministic() {
        let content = "Precisamos discutir o projeto";
        let a = suggest_response(Category::Productive, content, 0.85, &mut StdRng::seed_from_u64(7));
        let b = suggest_response(Category::Productive, content, 0.85, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn detects_professional_topic() {
        let topic = productive_topic("Segue meu curriculum para a vaga de emprego");
        assert_eq!(topic, ProductiveTopic::Professional);
    }

    #[test]
    fn detects_commercial_topic() {
        let topic = productive_topic("Gostaria de um orçamento: preço do produto e oferta de serviço");
        assert_eq!(topic, ProductiveTopic::Commercial);
    }

    #[test]
    fn productive_topic_defaults_to_work() {
        assert_eq!(productive_topic("bom dia"), ProductiveTopic::Work);
    }

    #[test]
    fn detects_phishing_topic() {
        let topic = unproductive_topic("Clique para verificar conta e atualizar dados");
        assert_eq!(topic, UnproductiveTopic::Phishing);
    }

    #[test]
    fn detects_chain_topic() {
        let topic = unproductive_topic("Fwd: reencaminhar para 10 amigos, passe adiante");
        assert_eq!(topic, UnproductiveTopic::Chain);
    }

    #[test]
    fn high_confidence_productive_gets_emphatic_suffix() {
        let response = suggest_response(
            Category::Productive,
            "reunião do projeto",
            0.95,
            &mut StdRng::seed_from_u64(1),
        );
        assert!(response.ends_with("Estou confiante de que podemos trabalhar juntos neste projeto."));
    }

    #[test]
    fn high_confidence_unproductive_gets_firm_suffix() {
        let response = suggest_response(
            Category::Unproductive,
            "você ganhou na loteria",
            0.95,
            &mut StdRng::seed_from_u64(1),
        );
        assert!(response.ends_with("Por favor, não envie mais este tipo de email."));
    }

    #[test]
    fn mid_confidence_uses_plain_template() {
        let response = suggest_response(
            Category::Productive,
            "reunião do projeto",
            0.8,
            &mut StdRng::seed_from_u64(1),
        );
        assert!(WORK_TEMPLATES.contains(&response.as_str()));
    }

    #[test]
    fn low_confidence_falls_back_to_neutral() {
        let response = suggest_response(
            Category::Productive,
            "reunião do projeto",
            0.7,
            &mut StdRng::seed_from_u64(1),
        );
        assert!(
            NEUTRAL_TEMPLATES
                .iter()
                .any(|t| response.starts_with(t))
        );
        assert!(response.ends_with("Gostaria de entender melhor suas necessidades."));
    }
}
