pub mod gear_map;
