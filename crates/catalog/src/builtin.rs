//! Catalog shipped with the application.

use crate::category::Category::{
    self, Animation, Architecture, Components, Effects, Fundamentals, Gestures, Layout, Lists,
    Navigation, Performance, State, Testing, Theming,
};
use crate::module::ModuleDescriptor;

fn entry(
    id: &str,
    name: &str,
    level: u8,
    category: Category,
    description: &str,
    long_description: &str,
    prerequisites: &[&str],
) -> ModuleDescriptor {
    ModuleDescriptor::new(id, name, level, category)
        .with_description(description)
        .with_long_description(long_description)
        .with_prerequisites(prerequisites.iter().copied())
}

/// Built-in modules in launcher order.
#[allow(clippy::too_many_lines)]
pub(crate) fn modules() -> Vec<ModuleDescriptor> {
    vec![
        // Level 1
        entry(
            "composable_functions",
            "Composable Functions",
            1,
            Fundamentals,
            "Describe UI as functions of data",
            "Problem: imperative view trees drift out of sync with data. Solution: emit UI from plain functions that re-run when their inputs change.",
            &[],
        ),
        entry(
            "text",
            "Text",
            1,
            Fundamentals,
            "Display and style text",
            "Problem: raw strings need fonts, weights and overflow handling. Solution: the Text element with style parameters and max-lines truncation.",
            &["composable_functions"],
        ),
        entry(
            "modifier",
            "Modifier",
            1,
            Fundamentals,
            "Decorate elements with padding, size and clicks",
            "Problem: every element needs sizing, spacing and input handling. Solution: an ordered modifier chain where order changes the result.",
            &["composable_functions"],
        ),
        entry(
            "preview",
            "Preview",
            1,
            Fundamentals,
            "Render components without running the app",
            "Problem: checking a component means navigating to it. Solution: preview annotations render isolated components with sample data.",
            &["composable_functions"],
        ),
        // Level 2
        entry(
            "column_row",
            "Column & Row",
            2,
            Layout,
            "Stack children vertically or horizontally",
            "Problem: placing siblings by hand is brittle. Solution: linear layouts with arrangement and alignment parameters.",
            &["modifier"],
        ),
        entry(
            "box_layout",
            "Box",
            2,
            Layout,
            "Overlap children and align them inside a frame",
            "Problem: badges and overlays need stacking. Solution: a Box with per-child alignment.",
            &["modifier"],
        ),
        entry(
            "constraint_layout",
            "ConstraintLayout",
            2,
            Layout,
            "Position elements relative to each other",
            "Problem: deeply nested rows and columns get hard to read. Solution: declare constraints between references in a flat layout.",
            &["column_row", "box_layout"],
        ),
        entry(
            "custom_layout",
            "Custom Layout",
            2,
            Layout,
            "Measure and place children yourself",
            "Problem: built-in layouts cannot express staggered or circular placement. Solution: the layout primitive with explicit measure and place passes.",
            &["column_row"],
        ),
        // Level 3
        entry(
            "remember",
            "remember",
            3,
            State,
            "Keep values across recompositions",
            "Problem: local variables reset every time the function re-runs. Solution: remember stores a value in the composition.",
            &["composable_functions"],
        ),
        entry(
            "mutable_state",
            "mutableStateOf",
            3,
            State,
            "Trigger recomposition when a value changes",
            "Problem: changing a plain variable does not refresh the screen. Solution: observable state holders that schedule recomposition on write.",
            &["remember"],
        ),
        entry(
            "state_hoisting",
            "State Hoisting",
            3,
            State,
            "Move state up to make components stateless",
            "Problem: components that own their state are hard to reuse and test. Solution: pass the value down and events up.",
            &["mutable_state"],
        ),
        entry(
            "remember_saveable",
            "rememberSaveable",
            3,
            State,
            "Survive configuration changes",
            "Problem: rotating the device loses remembered values. Solution: saveable state that round-trips through the saved-instance bundle.",
            &["remember"],
        ),
        entry(
            "derived_state",
            "derivedStateOf",
            3,
            State,
            "Recompute only when the derived result changes",
            "Problem: a scroll offset changes every frame but the UI only cares about a threshold. Solution: derived state that filters redundant updates.",
            &["mutable_state"],
        ),
        // Level 4
        entry(
            "button",
            "Button",
            4,
            Components,
            "Clickable actions in several emphasis styles",
            "Problem: actions need consistent touch targets and emphasis. Solution: filled, outlined and text buttons with shared content slots.",
            &["modifier"],
        ),
        entry(
            "text_field",
            "TextField",
            4,
            Components,
            "Editable text input",
            "Problem: text input needs state, labels and keyboard options. Solution: a hoisted value with an on-change callback.",
            &["state_hoisting"],
        ),
        entry(
            "scaffold",
            "Scaffold",
            4,
            Components,
            "Top bar, bottom bar, FAB and content slots",
            "Problem: every screen repeats the same chrome. Solution: a slot-based scaffold that handles insets.",
            &["column_row", "box_layout"],
        ),
        entry(
            "dialog",
            "Dialog",
            4,
            Components,
            "Modal confirmations and alerts",
            "Problem: confirmations must block interaction until answered. Solution: state-driven dialogs shown while a flag is set.",
            &["button", "mutable_state"],
        ),
        // Level 5
        entry(
            "lazy_column",
            "LazyColumn",
            5,
            Lists,
            "Render long lists efficiently",
            "Problem: composing thousands of rows up front is slow. Solution: lazy lists that compose only visible items, keyed for stability.",
            &["column_row"],
        ),
        entry(
            "lazy_grid",
            "LazyVerticalGrid",
            5,
            Lists,
            "Lay items out in a scrolling grid",
            "Problem: galleries need columns that adapt to width. Solution: fixed or adaptive grid cells in a lazy container.",
            &["lazy_column"],
        ),
        entry(
            "sticky_headers",
            "Sticky Headers",
            5,
            Lists,
            "Section headers that pin while scrolling",
            "Problem: long grouped lists lose context. Solution: sticky header items in a lazy list.",
            &["lazy_column"],
        ),
        // Level 6
        entry(
            "material_theme",
            "MaterialTheme",
            6,
            Theming,
            "Colors, typography and shapes from one place",
            "Problem: hard-coded colors break dark mode. Solution: a theme providing color schemes, type scale and shapes to every descendant.",
            &["text", "button"],
        ),
        entry(
            "composition_local",
            "CompositionLocal",
            6,
            Theming,
            "Pass values implicitly down the tree",
            "Problem: threading a value through every function is noisy. Solution: composition locals provided once and read anywhere below.",
            &["material_theme"],
        ),
        // Level 7
        entry(
            "launched_effect",
            "LaunchedEffect",
            7,
            Effects,
            "Run suspend work tied to the composition",
            "Problem: starting a coroutine on every recomposition leaks work. Solution: an effect keyed on inputs that restarts when the keys change and cancels on exit.",
            &["mutable_state"],
        ),
        entry(
            "disposable_effect",
            "DisposableEffect",
            7,
            Effects,
            "Register and clean up listeners",
            "Problem: callbacks registered from UI outlive the screen. Solution: an effect with a mandatory onDispose cleanup block.",
            &["launched_effect"],
        ),
        entry(
            "side_effect",
            "SideEffect",
            7,
            Effects,
            "Publish state to non-compose code after each commit",
            "Problem: external objects must mirror UI state exactly once per successful composition. Solution: SideEffect runs after every commit.",
            &["launched_effect"],
        ),
        entry(
            "produce_state",
            "produceState",
            7,
            Effects,
            "Turn async sources into state",
            "Problem: a network call or flow needs to appear as plain state. Solution: a producer coroutine that writes into a state holder.",
            &["launched_effect"],
        ),
        entry(
            "remember_coroutine_scope",
            "rememberCoroutineScope",
            7,
            Effects,
            "Launch coroutines from click handlers",
            "Problem: event callbacks are not suspend functions. Solution: a composition-bound scope that cancels when the caller leaves.",
            &["launched_effect"],
        ),
        // Level 8
        entry(
            "animate_as_state",
            "animate*AsState",
            8,
            Animation,
            "Animate a single value toward a target",
            "Problem: values that snap look jarring. Solution: state animations that interpolate whenever the target changes.",
            &["mutable_state"],
        ),
        entry(
            "animated_visibility",
            "AnimatedVisibility",
            8,
            Animation,
            "Animate elements entering and leaving",
            "Problem: conditionally shown content pops in and out. Solution: enter and exit transitions wrapped around the content.",
            &["animate_as_state"],
        ),
        entry(
            "update_transition",
            "updateTransition",
            8,
            Animation,
            "Coordinate several animations from one state",
            "Problem: independent animations drift apart. Solution: a transition that drives child animations from a shared target state.",
            &["animate_as_state"],
        ),
        entry(
            "infinite_transition",
            "InfiniteTransition",
            8,
            Animation,
            "Loop animations such as shimmer and pulse",
            "Problem: loading placeholders need perpetual motion. Solution: infinitely repeating transitions.",
            &["update_transition"],
        ),
        // Level 9
        entry(
            "nav_host",
            "NavHost",
            9,
            Navigation,
            "Move between screens with a back stack",
            "Problem: swapping screens by hand loses back navigation. Solution: a navigation host with a graph of routes.",
            &["scaffold"],
        ),
        entry(
            "nav_arguments",
            "Navigation Arguments",
            9,
            Navigation,
            "Pass typed data between destinations",
            "Problem: screens need ids from the caller. Solution: route arguments declared in the graph and read from the back-stack entry.",
            &["nav_host"],
        ),
        entry(
            "deep_links",
            "Deep Links",
            9,
            Navigation,
            "Open destinations from external URIs",
            "Problem: notifications should land on a specific screen. Solution: deep-link patterns attached to destinations.",
            &["nav_arguments"],
        ),
        entry(
            "drag_gestures",
            "Drag Gestures",
            9,
            Gestures,
            "Track pointer drags and swipes",
            "Problem: swipe-to-dismiss needs raw pointer deltas. Solution: draggable modifiers and pointer-input detectors.",
            &["modifier", "animate_as_state"],
        ),
        entry(
            "view_model",
            "ViewModel Integration",
            9,
            Architecture,
            "Expose screen state from a ViewModel",
            "Problem: UI-owned state dies with the screen. Solution: a ViewModel exposing state flows collected with lifecycle awareness.",
            &["state_hoisting", "launched_effect"],
        ),
        // Level 10
        entry(
            "ui_testing",
            "UI Testing",
            10,
            Testing,
            "Find nodes and assert on the semantics tree",
            "Problem: manual checks miss regressions. Solution: compose test rules with finders, actions and assertions.",
            &["button", "text_field"],
        ),
        entry(
            "screenshot_testing",
            "Screenshot Testing",
            10,
            Testing,
            "Catch visual regressions with golden images",
            "Problem: logic tests do not see layout breakage. Solution: rendered snapshots compared against stored goldens.",
            &["ui_testing", "preview"],
        ),
        entry(
            "recomposition",
            "Recomposition Performance",
            10,
            Performance,
            "Skip work with stable types and keys",
            "Problem: lists stutter when every item recomposes. Solution: stable parameters, keys and deferred reads.",
            &["derived_state", "lazy_column"],
        ),
        entry(
            "baseline_profiles",
            "Baseline Profiles",
            10,
            Performance,
            "Speed up startup with ahead-of-time compilation hints",
            "Problem: first frames are slow while code is interpreted. Solution: shipped profiles that precompile hot paths.",
            &["recomposition"],
        ),
    ]
}
