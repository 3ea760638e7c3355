//! Hints, visual aids and worked explanations for a generated problem.
//!
//! All text is child-facing Spanish and is also what the narration layer
//! reads aloud, so it stays short and concrete.

use crate::problems::problem::{
    Explanation, ExplanationStep, Hint, HintType, VisualAid, VisualElement, VisualType,
};
use crate::skills::concept::Operation;

/// Operands above this are drawn as tens and units instead of one icon each.
pub const ICON_LIMIT: u32 = 20;

const ICON_A: &str = "🟡";
const ICON_B: &str = "🟢";
const ICON_REMOVED: &str = "❌";
const ICON_TEN: &str = "🟦";

/// `n` copies of `icon`, or a compact "🟡×42" once `n` exceeds [`ICON_LIMIT`].
pub fn icons(icon: &str, n: u32) -> String {
    if n <= ICON_LIMIT {
        icon.repeat(n as usize)
    } else {
        format!("{}×{}", icon, n)
    }
}

fn tens_and_units(n: u32) -> String {
    format!("{}{}", icons(ICON_TEN, n / 10), ICON_A.repeat((n % 10) as usize))
}

/// `n` copies of `group` separated by spaces, or "(🟡🟡)×n grupos" once `n`
/// exceeds [`ICON_LIMIT`].
fn groups(group: &str, n: u32) -> String {
    if n <= ICON_LIMIT {
        vec![group; n as usize].join(" ")
    } else {
        format!("({})×{} grupos", group, n)
    }
}

fn element(content: String, position: u32) -> VisualElement {
    VisualElement { content, position, interactive: false }
}

fn hint(level: u32, text: String, kind: HintType) -> Hint {
    Hint { level, text, kind }
}

/// Four hints, from generic to specific.
pub fn hints(operation: Operation, a: u32, b: u32) -> Vec<Hint> {
    match operation {
        Operation::Addition => vec![
            hint(1, "💡 Puedes usar tus dedos para contar".into(), HintType::Visual),
            hint(2, format!("🔢 Empieza desde {} y cuenta {} números más", a, b), HintType::StepByStep),
            hint(3, "➕ Sumar significa 'juntar' o 'agregar'".into(), HintType::Conceptual),
            hint(4, format!("✨ La respuesta será mayor que {}", a), HintType::Encouragement),
        ],
        Operation::Subtraction => vec![
            hint(1, "💡 Restar significa 'quitar' algo".into(), HintType::Conceptual),
            hint(2, format!("🔢 Empieza desde {} y cuenta {} hacia atrás", a, b), HintType::StepByStep),
            hint(3, format!("➖ ¿Cuánto queda si quitas {} de {}?", b, a), HintType::Visual),
            hint(4, format!("✨ La respuesta será menor que {}", a), HintType::Encouragement),
        ],
        Operation::Multiplication => vec![
            hint(1, "💡 Multiplicar es sumar el mismo número varias veces".into(), HintType::Conceptual),
            hint(2, format!("🔢 {} × {} = {} + {} + ... ({} veces)", a, b, a, a, b), HintType::StepByStep),
            hint(3, format!("✖️ Puedes hacer grupos de {}", a), HintType::Visual),
            hint(4, format!("✨ ¿Recuerdas la tabla del {}?", a), HintType::Encouragement),
        ],
        Operation::Division => vec![
            hint(1, "💡 Dividir es repartir en grupos iguales".into(), HintType::Conceptual),
            hint(2, format!("🔢 ¿Cuántas veces cabe {} en {}?", b, a), HintType::StepByStep),
            hint(3, format!("➗ Piensa en la tabla del {}", b), HintType::Visual),
            hint(4, format!("✨ {} × ? = {}", b, a), HintType::Encouragement),
        ],
    }
}

pub fn visual_aid(operation: Operation, a: u32, b: u32, answer: u32) -> VisualAid {
    match operation {
        Operation::Addition if a.max(b) > ICON_LIMIT => VisualAid {
            kind: VisualType::Decomposition,
            description: "Separa en decenas y unidades".into(),
            elements: vec![
                element(format!("{} = {}", a, tens_and_units(a)), 0),
                element(format!("{} = {}", b, tens_and_units(b)), 1),
                element(format!("Total: {}", answer), 2),
            ],
        },
        Operation::Addition => VisualAid {
            kind: VisualType::CountingObjects,
            description: "Cuenta todos los objetos".into(),
            elements: vec![
                element(icons(ICON_A, a), 0),
                element(icons(ICON_B, b), 1),
                element(format!("Total: {}", answer), 2),
            ],
        },
        Operation::Subtraction if a > ICON_LIMIT => VisualAid {
            kind: VisualType::Decomposition,
            description: "Separa en decenas y unidades".into(),
            elements: vec![
                element(format!("{} = {}", a, tens_and_units(a)), 0),
                element(format!("Quitar {} = {}", b, tens_and_units(b)), 1),
                element(format!("Quedan: {}", answer), 2),
            ],
        },
        Operation::Subtraction => VisualAid {
            kind: VisualType::CountingObjects,
            description: "Quita los objetos marcados".into(),
            elements: vec![
                element(format!("Inicial: {}", icons(ICON_A, a)), 0),
                element(format!("Quitar: {}", icons(ICON_REMOVED, b)), 1),
                element(format!("Quedan: {}", icons(ICON_A, answer)), 2),
            ],
        },
        Operation::Multiplication => {
            let mut elements: Vec<VisualElement> = if b <= ICON_LIMIT {
                (1..=b)
                    .map(|group| element(format!("Grupo {}: {}", group, icons(ICON_A, a)), group - 1))
                    .collect()
            } else {
                vec![element(format!("Grupos: {}", groups(&icons(ICON_A, a), b)), 0)]
            };
            let total_position = elements.len() as u32;
            elements.push(element(format!("Total: {}", answer), total_position));
            VisualAid {
                kind: VisualType::Grouping,
                description: "Cuenta los grupos".into(),
                elements,
            }
        }
        Operation::Division => VisualAid {
            kind: VisualType::Grouping,
            description: "Reparte en grupos iguales".into(),
            elements: vec![
                element(format!("Total: {}", icons(ICON_A, a)), 0),
                element(
                    format!("Grupos de {}: {}", b, groups(&icons(ICON_A, b), answer)),
                    1,
                ),
                element(format!("Resultado: {} grupos", answer), 2),
            ],
        },
    }
}

fn step(number: u32, title: &str, description: String, calculation: String, visual: Option<String>) -> ExplanationStep {
    ExplanationStep {
        number,
        title: title.to_string(),
        description,
        calculation,
        visual,
    }
}

pub fn explanation(operation: Operation, a: u32, b: u32, answer: u32) -> Explanation {
    match operation {
        Operation::Addition => Explanation {
            steps: vec![
                step(1, "Identifica los números", format!("Tenemos {} y {}", a, b), format!("{} + {}", a, b),
                    Some(format!("{} + {}", icons(ICON_A, a), icons(ICON_B, b)))),
                step(2, "Cuenta desde el primer número", format!("Empieza en {} y cuenta {} más", a, b),
                    format!("{} → {} → ... → {}", a, a.saturating_add(1), answer), None),
                step(3, "Resultado", format!("Al juntar todo obtenemos {}", answer),
                    format!("{} + {} = {}", a, b, answer), None),
            ],
            visual_representation: format!("{} + {} = {}", icons(ICON_A, a), icons(ICON_B, b), answer),
            audio_script: format!(
                "Vamos a sumar {} más {}. Empezamos con {} y agregamos {} más, eso nos da {}.",
                a, b, a, b, answer
            ),
        },
        Operation::Subtraction => Explanation {
            steps: vec![
                step(1, "Identifica los números", format!("Tenemos {} y queremos quitar {}", a, b),
                    format!("{} - {}", a, b),
                    Some(format!("{} (quitamos {})", icons(ICON_A, a), icons(ICON_REMOVED, b)))),
                step(2, "Cuenta hacia atrás", format!("Desde {}, cuenta {} hacia atrás", a, b),
                    format!("{} → {} → ... → {}", a, a.saturating_sub(1), answer), None),
                step(3, "Resultado", format!("Después de quitar {}, quedan {}", b, answer),
                    format!("{} - {} = {}", a, b, answer), None),
            ],
            visual_representation: format!(
                "{} - {} = {}",
                icons(ICON_A, a),
                icons(ICON_REMOVED, b),
                icons(ICON_A, answer)
            ),
            audio_script: format!(
                "Vamos a restar {} de {}. Empezamos con {} y quitamos {}, nos quedan {}.",
                b, a, a, b, answer
            ),
        },
        Operation::Multiplication => Explanation {
            steps: vec![
                step(1, "Entender la multiplicación", "Multiplicar es sumar el mismo número varias veces".into(),
                    format!("{} × {}", a, b), None),
                step(2, "Crear grupos", format!("Hacemos {} grupos de {}", b, a),
                    format!("{} + {} + ... ({} veces)", a, a, b),
                    Some(groups(&icons(ICON_A, a), b))),
                step(3, "Contar el total", format!("Contamos todo y obtenemos {}", answer),
                    format!("{} × {} = {}", a, b, answer), None),
            ],
            visual_representation: format!("{} = {}", groups(&icons(ICON_A, a), b), answer),
            audio_script: format!(
                "Vamos a multiplicar {} por {}. Eso significa {} grupos de {}, que nos da {}.",
                a, b, b, a, answer
            ),
        },
        Operation::Division => Explanation {
            steps: vec![
                step(1, "Entender la división", "Dividir es repartir en grupos iguales".into(),
                    format!("{} ÷ {}", a, b), None),
                step(2, "Hacer grupos", format!("Repartimos {} objetos en grupos de {}", a, b),
                    "¿Cuántos grupos?".into(),
                    Some(groups(&icons(ICON_A, b), answer))),
                step(3, "Contar grupos", format!("Obtenemos {} grupos completos", answer),
                    format!("{} ÷ {} = {}", a, b, answer), None),
            ],
            visual_representation: format!(
                "{} → {} = {} grupos",
                icons(ICON_A, a),
                groups(&icons(ICON_A, b), answer),
                answer
            ),
            audio_script: format!(
                "Vamos a dividir {} entre {}. Repartimos en grupos de {} y obtenemos {} grupos.",
                a, b, b, answer
            ),
        },
    }
}
