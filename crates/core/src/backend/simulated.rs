//! Canned lesson used by the simulated run.

use aura_protocol::project_models::ScriptContent;

const PLACEHOLDER_VIDEO_URL: &str = "https://picsum.photos/seed/math/1280/720";

const DERIVATIVE_SCENE: &str = r#"from manim import *

class MathLessonScene(Scene):
    def construct(self):
        title = Text("The Derivative", font="JetBrains Mono").scale(1.5)
        title.set_color_by_gradient(BLUE, TEAL)
        self.play(Write(title))
        self.wait(1)
        self.play(FadeOut(title))

        axes = Axes(
            x_range=[-3, 3, 1],
            y_range=[-2, 4, 1],
            axis_config={"color": BLUE}
        )

        func = axes.plot(lambda x: x**2, color=PURPLE)
        func_label = axes.get_graph_label(func, label="f(x)=x^2")

        self.play(Create(axes), Create(func), Write(func_label))

        t = ValueTracker(1)

        dot = always_redraw(lambda: Dot(point=axes.c2p(t.get_value(), t.get_value()**2), color=YELLOW))
        tangent = always_redraw(lambda:
            axes.get_secant_slope_group(t.get_value(), func, dx=0.01, secant_line_length=4, secant_line_color=TEAL)
        )

        self.play(FadeIn(dot), Create(tangent))
        self.play(t.animate.set_value(-1), run_time=3)
        self.play(t.animate.set_value(0.5), run_time=2)

        definition = MathTex(r"f'(x) = \lim_{h \to 0} \frac{f(x+h) - f(x)}{h}")
        definition.to_edge(UP)
        self.play(Write(definition))

        self.wait(2)
"#;

/// Everything the simulated run produces for a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedLesson {
    pub title: String,
    pub script: ScriptContent,
    pub generated_code: String,
    pub video_url: String,
}

impl SimulatedLesson {
    /// The demo lesson, titled after `topic`.
    ///
    /// Script and scene are the same for every topic.
    pub fn for_topic(topic: &str) -> Self {
        Self {
            title: topic.to_string(),
            script: ScriptContent {
                intro: "Welcome to Aura Math. Today, we're decoding the instantaneous rate of change: The Derivative.".to_string(),
                explanation: "Imagine a curve representing a function f(x). The derivative, f'(x), gives us the slope of the tangent line at any specific point. As we zoom in infinitely close, the curve behaves like a straight line.".to_string(),
                conclusion: "In essence, the derivative captures the 'now' of a changing system. Keep calculating, and stay curious.".to_string(),
            },
            generated_code: DERIVATIVE_SCENE.to_string(),
            video_url: PLACEHOLDER_VIDEO_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_lesson_is_complete() {
        let lesson = SimulatedLesson::for_topic("Chain Rule");
        assert_eq!(lesson.title, "Chain Rule");
        assert!(lesson.script.is_complete());
        assert!(lesson.generated_code.contains("class MathLessonScene(Scene)"));
        assert!(!lesson.video_url.is_empty());
    }
}
