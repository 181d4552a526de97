use std::{thread::sleep, time::{Duration, Instant}};

use crate::config::{Config, QuitPolicy};
use crate::food;
use crate::segment::{Color, Segment};
use crate::snake::{Snake, Direction::*};
use crate::term::{Event, Key, Surface};

use anyhow::Result;
use log::{debug, info};
use rand::{rngs::ThreadRng, Rng};

/// How a finished game ended up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameOver {
    pub score: u64,
    pub ticks: u64,
}

/// Fixed-rate throttle for the game loop.
pub struct Clock {
    interval: Duration,
    last: Instant,
}

impl Clock {
    pub fn new(rate_hz: u32) -> Self {
        let interval = Duration::from_secs(1) / rate_hz.max(1);
        Clock { interval, last: Instant::now() }
    }

    /// Blocks until one interval has passed since the previous call.
    pub fn tick(&mut self) {
        let elapsed = self.last.elapsed();
        if elapsed < self.interval {
            sleep(self.interval - elapsed);
        }
        self.last = Instant::now();
    }
}

pub struct SnakeGame<R = ThreadRng> {
    config: Config,
    snake: Snake,
    food: Option<Segment>,
    over: bool,
    score: u64,
    ticks: u64,
    rng: R,
}

impl SnakeGame<ThreadRng> {
    pub fn new(config: Config) -> Self {
        SnakeGame::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> SnakeGame<R> {
    pub fn with_rng(config: Config, rng: R) -> Self {
        SnakeGame {
            config,
            snake: Snake::default(),
            food: None,
            over: false,
            score: 0,
            ticks: 0,
            rng,
        }
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Draws the starting position, then ticks until the game ends.
    pub fn run<S: Surface>(&mut self, surface: &mut S, clock: &mut Clock) -> Result<GameOver> {
        info!("Starting game with {:?}", self.config);

        self.draw_snake(surface)?;
        self.draw_score(surface)?;
        surface.present()?;

        while !self.is_over() {
            self.tick(surface)?;
            clock.tick();
        }

        let result = GameOver { score: self.score(), ticks: self.ticks };
        info!("Game over after {} ticks, score {}", result.ticks, result.score);
        Ok(result)
    }

    /// One frame: input, movement, collision, food, drawing.
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> Result<()> {
        self.ticks += 1;

        for ev in surface.poll_events()? {
            debug!("Event: {:?}", ev);
            self.handle_event(ev);
        }

        surface.fill_background(Color::Background.rgb())?;

        self.snake.move_step();
        self.draw_snake(surface)?;

        if self.snake.is_collision() {
            info!("Snake crashed at {:?}", self.snake.head().position());
            self.over = true;
        }

        let food = match self.food {
            Some(food) => food,
            None => {
                let food = food::spawn(&mut self.rng);
                self.food = Some(food);
                food
            }
        };
        draw_segment(surface, &food)?;

        if self.snake.head().same_cell(&food) {
            self.food = None;
            self.snake.grow();
            if self.config.track_score {
                self.score += 1;
            }
            info!("Ate food at {:?}, length {}", food.position(), self.snake.len());
        }

        self.draw_score(surface)?;
        surface.present()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn handle_event(&mut self, ev: Event) {
        match ev {
            Event::KeyDown(key) => match key {
                Key::Up => self.snake.change_direction(Up),
                Key::Down => self.snake.change_direction(Down),
                Key::Left => self.snake.change_direction(Left),
                Key::Right => self.snake.change_direction(Right),
                Key::Escape => self.over = true,
            },
            Event::Quit => match self.config.quit_policy {
                QuitPolicy::EndGame => self.over = true,
                QuitPolicy::Ignore => debug!("Quit requested, ignored by policy"),
            },
        }
    }

    fn draw_snake<S: Surface>(&self, surface: &mut S) -> Result<()> {
        for seg in self.snake.body() {
            draw_segment(surface, seg)?;
        }
        Ok(())
    }

    fn draw_score<S: Surface>(&self, surface: &mut S) -> Result<()> {
        if !self.config.track_score {
            return Ok(());
        }
        surface.draw_text(Color::Yellow.rgb(), 0, 0, &format!("Your Score: {}", self.score))
    }
}

fn draw_segment<S: Surface>(surface: &mut S, seg: &Segment) -> Result<()> {
    surface.draw_rect(seg.color().rgb(), seg.col(), seg.row(), Segment::SIZE, Segment::SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, segment::Rgb};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::VecDeque;

    #[derive(Debug, PartialEq)]
    enum Draw {
        Fill(Rgb),
        Rect(Rgb, Coord, Coord),
        Text(String),
        Present,
    }

    #[derive(Default)]
    struct Recorder {
        pending: VecDeque<Vec<Event>>,
        draws: Vec<Draw>,
    }

    impl Recorder {
        fn with_events(events: Vec<Vec<Event>>) -> Self {
            Recorder { pending: events.into(), draws: vec![] }
        }

        fn presents(&self) -> usize {
            self.draws.iter().filter(|d| **d == Draw::Present).count()
        }
    }

    impl Surface for Recorder {
        fn fill_background(&mut self, rgb: Rgb) -> Result<()> {
            self.draws.push(Draw::Fill(rgb));
            Ok(())
        }

        fn draw_rect(&mut self, rgb: Rgb, x: Coord, y: Coord, _w: Coord, _h: Coord) -> Result<()> {
            self.draws.push(Draw::Rect(rgb, x, y));
            Ok(())
        }

        fn draw_text(&mut self, _rgb: Rgb, _x: Coord, _y: Coord, text: &str) -> Result<()> {
            self.draws.push(Draw::Text(text.to_string()));
            Ok(())
        }

        fn poll_events(&mut self) -> Result<Vec<Event>> {
            Ok(self.pending.pop_front().unwrap_or_default())
        }

        fn present(&mut self) -> Result<()> {
            self.draws.push(Draw::Present);
            Ok(())
        }
    }

    fn game(config: Config) -> SnakeGame<StdRng> {
        SnakeGame::with_rng(config, StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_tick_draw_order() {
        let mut g = game(Config::default());
        g.food = Some(food_at(0, 0));
        let mut surface = Recorder::default();
        g.tick(&mut surface).unwrap();

        let blue = Color::Blue.rgb();
        assert_eq!(surface.draws[0], Draw::Fill(Color::Background.rgb()));
        assert_eq!(surface.draws[1], Draw::Rect(blue, 210, 200));
        assert_eq!(surface.draws[5], Draw::Rect(blue, 170, 200));
        assert_eq!(surface.draws[6], Draw::Rect(Color::Black.rgb(), 0, 0));
        assert_eq!(surface.draws[7], Draw::Text("Your Score: 0".to_string()));
        assert_eq!(surface.draws[8], Draw::Present);
        assert_eq!(surface.draws.len(), 9);
    }

    #[test]
    fn test_spawns_food_when_absent() {
        let mut g = game(Config::default());
        assert!(g.food.is_none());
        g.tick(&mut Recorder::default()).unwrap();

        let food = g.food.unwrap();
        assert_eq!(food.color(), Color::Black);
        assert!(food.row() < 200 && food.col() < 200);

        g.tick(&mut Recorder::default()).unwrap();
        assert_eq!(g.food, Some(food));
    }

    #[test]
    fn test_eating_food_grows_and_scores() {
        let mut g = game(Config::default());
        g.food = Some(food_at(200, 210));
        let mut surface = Recorder::default();
        g.tick(&mut surface).unwrap();

        assert!(g.food.is_none());
        assert_eq!(g.score(), 1);
        assert_eq!(g.snake.len(), 6);
        assert!(!g.is_over());
        assert_eq!(surface.draws.last(), Some(&Draw::Present));
        assert!(surface.draws.contains(&Draw::Text("Your Score: 1".to_string())));

        // Growth overlaps the head, but the next move pulls it apart.
        g.food = Some(food_at(0, 0));
        g.tick(&mut Recorder::default()).unwrap();
        assert!(!g.is_over());
        assert_eq!(g.snake.len(), 6);
    }

    #[test]
    fn test_without_score_tracking() {
        let mut g = game(Config { track_score: false, ..Config::default() });
        g.food = Some(food_at(200, 210));
        let mut surface = Recorder::default();
        g.tick(&mut surface).unwrap();

        assert_eq!(g.score(), 0);
        assert_eq!(g.snake.len(), 6);
        assert!(!surface.draws.iter().any(|d| matches!(d, Draw::Text(_))));
    }

    #[test]
    fn test_events_apply_in_order() {
        let mut g = game(Config::default());
        let events = vec![vec![
            Event::KeyDown(Key::Left),
            Event::KeyDown(Key::Up),
            Event::KeyDown(Key::Down),
        ]];
        g.tick(&mut Recorder::with_events(events)).unwrap();

        assert_eq!(g.snake.get_direction(), Up);
        assert_eq!(g.snake.head().position(), (190, 200));
    }

    #[test]
    fn test_escape_ends_after_frame() {
        let mut g = game(Config::default());
        let mut surface = Recorder::with_events(vec![vec![Event::KeyDown(Key::Escape)]]);
        g.tick(&mut surface).unwrap();

        assert!(g.is_over());
        assert_eq!(surface.presents(), 1);
        assert_eq!(g.snake.head().position(), (200, 210));
    }

    #[test]
    fn test_quit_policy() {
        let mut g = game(Config::default());
        g.tick(&mut Recorder::with_events(vec![vec![Event::Quit]])).unwrap();
        assert!(!g.is_over());

        let mut g = game(Config { quit_policy: QuitPolicy::EndGame, ..Config::default() });
        g.tick(&mut Recorder::with_events(vec![vec![Event::Quit]])).unwrap();
        assert!(g.is_over());
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut g = game(Config::default());
        let mut surface = Recorder::default();
        for _ in 0..18 {
            g.tick(&mut surface).unwrap();
            assert!(!g.is_over());
        }
        g.tick(&mut surface).unwrap();
        assert_eq!(g.snake.head().col(), 390);
        assert!(g.is_over());
    }

    #[test]
    fn test_run_returns_summary() {
        let mut g = game(Config::default());
        let mut surface = Recorder::with_events(vec![vec![], vec![Event::KeyDown(Key::Escape)]]);
        let result = g.run(&mut surface, &mut Clock::new(1000)).unwrap();

        assert_eq!(result, GameOver { score: 0, ticks: 2 });
        // The opening frame plus two ticks.
        assert_eq!(surface.presents(), 3);
    }

    #[test]
    fn test_clock_throttles() {
        let start = Instant::now();
        let mut clock = Clock::new(100);
        clock.tick();
        clock.tick();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    fn food_at(row: Coord, col: Coord) -> Segment {
        let mut food = Segment::new(row, col);
        food.set_color(Color::Black);
        food
    }
}
