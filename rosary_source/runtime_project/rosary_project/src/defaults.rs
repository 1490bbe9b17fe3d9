pub fn default_project_toml(name: &str) -> String {
    format!(
        r##"[project]
name = "{name}"

[camera]
fov = 20.0
near = 0.05
far = 400.0
position = [0.0, 0.0, 50.0]
target = [0.0, 1.0, 0.0]

[zoom]
min = 0
max = 2
transition_seconds = 1.0
padding = 1.2
min_distance = 0.6
zoom_to_item = true

[palette]
highlight = "#ff0000"
chain = "#606265"
small_bead = "#e1e3e6"
large_bead = "#39ffb4"
cross = "#a26f56"
center = "#39ffb4"

[storage]
key = "currentState"
backend = "file"
dir = "user://session"

[prompts]
cross = ["Apostles Creed"]
our_father = ["Our Father"]
hail_mary = ["Hail Mary"]
hail_holy_queen = ["Hail Holy Queen"]

[[prompts.override]]
position = 4
prompts = ["Hail Mary", "Glory Be"]

[[prompts.override]]
position = 15
prompts = ["Hail Mary", "Glory Be", "Fatima Prayer"]

[[prompts.override]]
position = 26
prompts = ["Hail Mary", "Glory Be", "Fatima Prayer"]

[[prompts.override]]
position = 37
prompts = ["Hail Mary", "Glory Be", "Fatima Prayer"]

[[prompts.override]]
position = 48
prompts = ["Hail Mary", "Glory Be", "Fatima Prayer"]

[[prompts.override]]
position = 59
prompts = ["Hail Mary", "Glory Be", "Fatima Prayer"]
"##
    )
}
