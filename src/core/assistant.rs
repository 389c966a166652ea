/// Reply returned when no rule matches the input
const FALLBACK_REPLY: &str = "Entiendo tu consulta. Para obtener ayuda específica, puedes contactar a nuestro equipo de soporte o explorar las diferentes secciones de la plataforma. ¿Hay algo específico en lo que pueda ayudarte?";

/// Greeting seeded into every new chat session
pub const WELCOME_REPLY: &str =
    "¡Hola! Soy el asistente virtual del Banco de Alimentos. ¿En qué puedo ayudarte hoy?";

/// One dispatch rule: the reply is selected when any trigger keyword appears
/// as a substring of the case-folded input.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub keywords: &'static [&'static str],
    pub reply: &'static str,
}

/// Rule table in priority order. The first matching rule wins, so an input
/// that mentions both donating and an event gets the donation reply.
const DEFAULT_RULES: &[Rule] = &[
    Rule {
        keywords: &["donar", "donación"],
        reply: "Para donar alimentos, ve a la sección 'Alimentos' y haz clic en 'Donar Alimentos'. Allí podrás registrar los productos que quieres donar con toda la información necesaria.",
    },
    Rule {
        keywords: &["solicitar", "pedir"],
        reply: "Para solicitar alimentos, navega a la sección 'Alimentos' donde podrás ver todos los productos disponibles. Haz clic en 'Solicitar Alimento' en el producto que necesites.",
    },
    Rule {
        keywords: &["voluntario", "evento"],
        reply: "¡Genial que quieras ser voluntario! Ve a la sección 'Eventos' para ver las oportunidades de voluntariado disponibles. Puedes unirte a eventos existentes o crear nuevos.",
    },
    Rule {
        keywords: &["campaña", "dinero"],
        reply: "En la sección 'Campañas' puedes ver todas las campañas solidarias activas. Puedes hacer donaciones monetarias para apoyar causas específicas.",
    },
    Rule {
        keywords: &["mapa", "ubicación"],
        reply: "El mapa te muestra todas las ubicaciones de alimentos disponibles, eventos de voluntariado y organizaciones cerca de ti. Ve a la sección 'Mapa' para explorarlo.",
    },
    Rule {
        keywords: &["perfil", "cuenta"],
        reply: "Puedes actualizar tu información personal en la sección 'Perfil'. Allí también puedes ver tus estadísticas de participación y configurar tu cuenta.",
    },
    Rule {
        keywords: &["ayuda", "help"],
        reply: "Estoy aquí para ayudarte. Puedes preguntarme sobre:\n• Cómo donar alimentos\n• Cómo solicitar alimentos\n• Eventos de voluntariado\n• Campañas solidarias\n• Usar el mapa\n• Gestionar tu perfil",
    },
    Rule {
        keywords: &["gracias", "thank"],
        reply: "¡De nada! Es un placer ayudarte. Si tienes más preguntas, no dudes en preguntarme.",
    },
];

/// Rule-based assistant: maps one line of free-form user text to exactly one
/// canned reply.
///
/// Total function over strings. Matching is case-insensitive and every call
/// is independent; no session state is carried between turns. Display timing
/// (the simulated typing delay) belongs to the caller.
#[derive(Debug, Clone)]
pub struct Assistant {
    rules: Vec<Rule>,
}

impl Assistant {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self {
            rules: DEFAULT_RULES.to_vec(),
        }
    }

    /// Produce the reply for one user input.
    ///
    /// Rules are evaluated in table order against the lowercased input; the
    /// first rule with a keyword hit wins. Unmatched input gets the fixed
    /// fallback reply.
    pub fn reply(&self, input: &str) -> &'static str {
        let normalized = input.to_lowercase();

        self.rules
            .iter()
            .find(|rule| rule.matches(&normalized))
            .map(|rule| rule.reply)
            .unwrap_or(FALLBACK_REPLY)
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

impl Rule {
    /// `normalized` must already be lowercased.
    fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|kw| normalized.contains(kw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donation_keyword_selects_donation_reply() {
        let assistant = Assistant::with_default_rules();

        for input in [
            "quiero donar comida",
            "DONAR",
            "¿Cómo puedo hacer una Donación?",
            "me interesa donar",
        ] {
            assert!(
                assistant.reply(input).contains("Donar Alimentos"),
                "input {:?} should hit the donation rule",
                input
            );
        }
    }

    #[test]
    fn test_unmatched_input_gets_fallback() {
        let assistant = Assistant::with_default_rules();

        assert_eq!(assistant.reply("xyzzy"), FALLBACK_REPLY);
        assert_eq!(assistant.reply(""), FALLBACK_REPLY);
        assert_eq!(assistant.reply("   "), FALLBACK_REPLY);
    }

    #[test]
    fn test_rule_priority_earlier_rule_wins() {
        let assistant = Assistant::with_default_rules();

        // Mentions both donating (rule 1) and an event (rule 3)
        let reply = assistant.reply("quiero donar en el próximo evento");
        assert!(reply.contains("Donar Alimentos"));
    }

    #[test]
    fn test_each_default_rule_is_reachable() {
        let assistant = Assistant::with_default_rules();

        for rule in DEFAULT_RULES {
            assert_eq!(assistant.reply(rule.keywords[0]), rule.reply);
        }
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let assistant = Assistant::with_default_rules();

        assert_eq!(assistant.reply("VOLUNTARIO"), assistant.reply("voluntario"));
        assert_eq!(assistant.reply("GrAcIaS"), assistant.reply("gracias"));
    }

    #[test]
    fn test_keyword_inside_larger_word_still_matches() {
        let assistant = Assistant::with_default_rules();

        // "donar" occurs inside "donaré"
        assert!(assistant.reply("mañana donaré arroz").contains("Donar Alimentos"));
    }

    #[test]
    fn test_help_reply_lists_topics() {
        let assistant = Assistant::with_default_rules();

        let reply = assistant.reply("necesito ayuda");
        assert!(reply.lines().count() > 3);
    }

    #[test]
    fn test_custom_rule_table() {
        let assistant = Assistant::new(vec![Rule {
            keywords: &["hola"],
            reply: "buenas",
        }]);

        assert_eq!(assistant.reply("Hola!"), "buenas");
        assert_eq!(assistant.reply("donar"), FALLBACK_REPLY);
    }
}
