//! Built-in portfolio deck shown when no deck file is configured.

use crate::{
    deck::{
        CallToAction, Deck, GlossaryTerm, ImpactMetric, ProblemCard, Profile, SectionBody,
        SectionContent, SkillCategory, Stat, TimelinePhase, ValueCard,
    },
    domain::{sections, SectionId},
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn cta(label: &str, target: &str) -> Option<CallToAction> {
    Some(CallToAction {
        label: label.to_string(),
        target: SectionId::new(target),
    })
}

pub fn glossary() -> Vec<GlossaryTerm> {
    [
        (
            "PSPO I",
            "Professional Scrum Product Owner - Certification Agile/Scrum pour la gestion de produit",
        ),
        (
            "Power BI",
            "Plateforme Microsoft de Business Intelligence et visualisation de données",
        ),
        (
            "PMO Expert",
            "Project Management Office - Expertise en gouvernance et pilotage de projets",
        ),
        (
            "Jira personnalisé",
            "Configuration avancée de Jira pour le suivi de projets et reporting exécutif",
        ),
        (
            "KPI consolidés",
            "Indicateurs de performance clés regroupés en tableaux de bord unifiés",
        ),
        (
            "Comités pilotage",
            "Instances de gouvernance pour le suivi et l'arbitrage des projets",
        ),
        (
            "Processus transverses",
            "Méthodes standardisées pour la coordination multi-équipes",
        ),
        (
            "Gestion dépendances",
            "Identification et suivi des interdépendances entre projets et équipes",
        ),
    ]
    .into_iter()
    .map(|(term, description)| GlossaryTerm {
        term: term.to_string(),
        description: description.to_string(),
    })
    .collect()
}

pub fn portfolio_deck() -> Deck {
    Deck {
        profile: Profile {
            name: "Mouad JOUID".to_string(),
            role: "Project Management Officer (PMO)".to_string(),
            tagline: "Gouvernance, reporting exécutif et pilotage multi-acteurs".to_string(),
            expertise: strings(&[
                "Gouvernance Projet",
                "Reporting Exécutif",
                "Pilotage Multi-acteurs",
            ]),
        },
        sections: vec![
            home_section(),
            plan_section(),
            problems_section(),
            skills_section(),
            culture_section(),
        ],
        glossary: glossary(),
    }
}

fn home_section() -> SectionContent {
    SectionContent {
        id: SectionId::new(sections::HOME),
        nav_label: "Accueil".to_string(),
        title: "Mouad JOUID".to_string(),
        subtitle: Some("Project Management Officer (PMO)".to_string()),
        call_to_action: cta("Découvrir mon plan 90 jours", sections::PLAN_90_DAYS),
        body: SectionBody::Home {
            headline: "Transformer la gouvernance projet en levier de performance".to_string(),
            stats: vec![
                Stat {
                    value: "15+".to_string(),
                    label: "Projets pilotés".to_string(),
                },
                Stat {
                    value: "40%".to_string(),
                    label: "Gain de visibilité".to_string(),
                },
                Stat {
                    value: "8".to_string(),
                    label: "Équipes coordonnées".to_string(),
                },
                Stat {
                    value: "100%".to_string(),
                    label: "Reporting à l'heure".to_string(),
                },
            ],
            badges: strings(&["PSPO I", "PMO Expert", "Power BI"]),
        },
    }
}

fn plan_section() -> SectionContent {
    SectionContent {
        id: SectionId::new(sections::PLAN_90_DAYS),
        nav_label: "Plan 90j".to_string(),
        title: "Plan d'action 90 jours".to_string(),
        subtitle: Some("Observer, structurer, accélérer".to_string()),
        call_to_action: cta("Voir les problèmes résolus", sections::PROBLEMS_SOLUTIONS),
        body: SectionBody::Timeline {
            phases: vec![
                TimelinePhase {
                    period: "J1 - J30".to_string(),
                    title: "Immersion et diagnostic".to_string(),
                    details: strings(&[
                        "Cartographie du portefeuille et des parties prenantes",
                        "Audit des rituels et des outils existants",
                        "Identification des irritants prioritaires",
                    ]),
                    tools: strings(&["Jira personnalisé", "Gestion dépendances"]),
                },
                TimelinePhase {
                    period: "J31 - J60".to_string(),
                    title: "Structuration de la gouvernance".to_string(),
                    details: strings(&[
                        "Mise en place des comités de pilotage",
                        "Tableaux de bord consolidés",
                        "Standardisation des processus transverses",
                    ]),
                    tools: strings(&["Comités pilotage", "KPI consolidés"]),
                },
                TimelinePhase {
                    period: "J61 - J90".to_string(),
                    title: "Accélération et amélioration continue".to_string(),
                    details: strings(&[
                        "Automatisation du reporting exécutif",
                        "Rétrospectives de portefeuille",
                        "Plan de montée en compétence des équipes",
                    ]),
                    tools: strings(&["Power BI", "Processus transverses"]),
                },
            ],
        },
    }
}

fn problems_section() -> SectionContent {
    SectionContent {
        id: SectionId::new(sections::PROBLEMS_SOLUTIONS),
        nav_label: "Problèmes & Solutions".to_string(),
        title: "Problèmes & Solutions".to_string(),
        subtitle: Some("Des irritants concrets, des réponses mesurables".to_string()),
        call_to_action: cta("Voir mes compétences", sections::SKILLS_RESULTS),
        body: SectionBody::ProblemsSolutions {
            cards: vec![
                ProblemCard {
                    icon: "📊".to_string(),
                    problem: "Visibilité limitée sur l'avancement des projets".to_string(),
                    solution: "Tableaux de bord consolidés mis à jour chaque semaine".to_string(),
                    methods: strings(&["KPI consolidés", "Power BI"]),
                },
                ProblemCard {
                    icon: "🔗".to_string(),
                    problem: "Dépendances inter-équipes découvertes trop tard".to_string(),
                    solution: "Registre des dépendances revu en comité".to_string(),
                    methods: strings(&["Gestion dépendances", "Comités pilotage"]),
                },
                ProblemCard {
                    icon: "⏱".to_string(),
                    problem: "Reporting manuel chronophage".to_string(),
                    solution: "Automatisation des extractions et des synthèses".to_string(),
                    methods: strings(&["Jira personnalisé"]),
                },
            ],
            impacts: vec![
                ImpactMetric {
                    value: "-60%".to_string(),
                    label: "temps de reporting".to_string(),
                },
                ImpactMetric {
                    value: "+35%".to_string(),
                    label: "respect des jalons".to_string(),
                },
                ImpactMetric {
                    value: "3x".to_string(),
                    label: "réactivité des arbitrages".to_string(),
                },
            ],
        },
    }
}

fn skills_section() -> SectionContent {
    SectionContent {
        id: SectionId::new(sections::SKILLS_RESULTS),
        nav_label: "Compétences".to_string(),
        title: "Compétences & Résultats".to_string(),
        subtitle: None,
        call_to_action: cta("Mon fit culturel", sections::CULTURAL_FIT),
        body: SectionBody::SkillsResults {
            categories: vec![
                SkillCategory {
                    name: "Gouvernance de portefeuille".to_string(),
                    level: 92,
                    result: "15 projets pilotés simultanément".to_string(),
                    tools: strings(&["Comités pilotage", "PMO Expert"]),
                },
                SkillCategory {
                    name: "Reporting exécutif".to_string(),
                    level: 88,
                    result: "Reporting hebdomadaire livré à 100%".to_string(),
                    tools: strings(&["Power BI", "KPI consolidés"]),
                },
                SkillCategory {
                    name: "Agilité à l'échelle".to_string(),
                    level: 85,
                    result: "8 équipes synchronisées".to_string(),
                    tools: strings(&["PSPO I", "Jira personnalisé"]),
                },
                SkillCategory {
                    name: "Coordination transverse".to_string(),
                    level: 90,
                    result: "Dépendances critiques réduites de moitié".to_string(),
                    tools: strings(&["Processus transverses", "Gestion dépendances"]),
                },
            ],
        },
    }
}

fn culture_section() -> SectionContent {
    SectionContent {
        id: SectionId::new(sections::CULTURAL_FIT),
        nav_label: "Fit culturel".to_string(),
        title: "Fit culturel".to_string(),
        subtitle: Some("Des valeurs partagées au service des équipes".to_string()),
        call_to_action: cta("Revenir à l'accueil", sections::HOME),
        body: SectionBody::CulturalFit {
            values: vec![
                ValueCard {
                    title: "Transparence".to_string(),
                    description: "Une information fiable, partagée au bon niveau".to_string(),
                    testimonial: Some(
                        "« Pour la première fois, le comité avait une vue claire. »".to_string(),
                    ),
                },
                ValueCard {
                    title: "Collaboration".to_string(),
                    description: "Faciliter plutôt que contrôler".to_string(),
                    testimonial: Some(
                        "« Les équipes se parlent enfin avant les jalons. »".to_string(),
                    ),
                },
                ValueCard {
                    title: "Exigence".to_string(),
                    description: "Des engagements tenus et mesurés".to_string(),
                    testimonial: None,
                },
            ],
        },
    }
}
