pub mod a_star_bot;
